//! Conversion session: dispatches declaration events to the encoders.

use crate::config::ConvertConfig;
use crate::error::{ConvertError, ConvertResult};
use crate::registry::VariableRegistry;
use crate::sink::{OutputSink, Program};
use crate::tree::convert_tree;
use cspconv_model::{Constraint, ConstraintDecl, Domain, Event, Instance, VariableDecl};
use tracing::{debug, info};

/// State of one conversion: the variable registry and the emitted statements.
///
/// Events must be fed in file order. The first error aborts the session; the
/// statements emitted so far are left in place but should not be used.
#[derive(Debug)]
pub struct Converter {
    pub(crate) config: ConvertConfig,
    pub(crate) registry: VariableRegistry,
    pub(crate) sink: OutputSink,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            registry: VariableRegistry::with_config(&config),
            sink: OutputSink::new(),
            config,
        }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    pub fn registry(&self) -> &VariableRegistry {
        &self.registry
    }

    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    /// Process one declaration event.
    pub fn process(&mut self, event: &Event) -> ConvertResult<()> {
        match event {
            Event::Variable(decl) => self.declare_variable(decl),
            Event::Constraint(decl) => self.declare_constraint(decl),
        }
    }

    /// Handle a variable declaration. Errors carry the variable id.
    pub fn declare_variable(&mut self, decl: &VariableDecl) -> ConvertResult<()> {
        debug!(id = %decl.id, "declaring variable");
        let result = match &decl.domain {
            Domain::Range { min, max } => self.declare_range(&decl.id, *min, *max),
            Domain::Values { values } => self.declare_values(&decl.id, values),
        };
        result.map_err(|source| ConvertError::Variable {
            id: decl.id.clone(),
            source: Box::new(source),
        })
    }

    /// Handle a constraint declaration. Errors carry the constraint id and kind.
    pub fn declare_constraint(&mut self, decl: &ConstraintDecl) -> ConvertResult<()> {
        let kind = decl.constraint.kind_name();
        debug!(id = %decl.id, kind, "converting constraint");
        self.encode_constraint(&decl.constraint)
            .map_err(|source| ConvertError::Constraint {
                id: decl.id.clone(),
                kind,
                source: Box::new(source),
            })
    }

    fn encode_constraint(&mut self, constraint: &Constraint) -> ConvertResult<()> {
        match constraint {
            Constraint::Intension { tree } => self.intension(tree),
            Constraint::Ordered { list, order } => self.ordered(list, *order),
            Constraint::AllDifferent { list } => self.all_different(list),
            Constraint::AllDifferentExprs { list } => self.all_different_exprs(list),
            Constraint::AllDifferentMatrix { matrix } => self.all_different_matrix(matrix),
            Constraint::Sum {
                list,
                coeffs,
                condition,
            } => self.sum(list, coeffs.as_deref(), condition),
            Constraint::Extension {
                list,
                tuples,
                support,
            } => self.extension(list, tuples, *support),
            Constraint::ExtensionUnary {
                variable,
                values,
                support,
            } => self.extension_unary(variable, values, *support),
            Constraint::Instantiation { list, values } => self.instantiation(list, values),
            Constraint::Element {
                list,
                start_index,
                index,
                rank,
                value,
            } => self.element(list, *start_index, index, *rank, value),
            Constraint::ElementMatrix {
                matrix,
                start_row_index,
                row_index,
                start_col_index,
                col_index,
                value,
            } => self.element_matrix(
                matrix,
                (*start_row_index, row_index),
                (*start_col_index, col_index),
                value,
            ),
            Constraint::Cardinality {
                list,
                values,
                occurs,
                closed,
            } => self.cardinality(list, values, occurs, *closed),
            Constraint::ExactlyK { list, value, k } => self.exactly_k(list, *value, *k),
            Constraint::Regular {
                list,
                start,
                finals,
                transitions,
            } => self.regular(list, start, finals, transitions),
        }
    }

    /// Boolean expression tree, coerced to `Bool`.
    pub fn intension(&mut self, tree: &cspconv_model::Node) -> ConvertResult<()> {
        let expr = convert_tree(tree, &self.registry)?.as_bool();
        self.sink.push(expr.into_text());
        Ok(())
    }

    /// Finish the session and return the program.
    pub fn finish(self) -> Program {
        self.sink.into_program()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertConfig::default())
    }
}

/// Convert a whole instance.
pub fn convert_instance(instance: &Instance, config: &ConvertConfig) -> ConvertResult<Program> {
    let mut converter = Converter::new(config.clone());
    for event in &instance.events {
        converter.process(event)?;
    }

    let program = converter.finish();
    info!(
        instance = instance.name.as_deref().unwrap_or("<unnamed>"),
        events = instance.events.len(),
        statements = program.statements.len(),
        "instance converted"
    );
    Ok(program)
}
