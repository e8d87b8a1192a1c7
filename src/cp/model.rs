//! CP model definition.

use super::solution::CpSolution;
use super::variables::{BoolVar, IntVar};
use std::collections::HashMap;

/// A constraint in the CP model.
///
/// These are the assignment/linear constraints needed to express
/// partitioning problems. Boolean literals take the value 0 or 1 when
/// they appear in arithmetic terms.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Exactly one of the boolean literals is true.
    ExactlyOne {
        /// Names of boolean variables.
        literals: Vec<String>,
    },

    /// `target == Σ coefficient * term`.
    ///
    /// Terms may name boolean or integer variables.
    LinearEq {
        /// Integer variable being defined.
        target: String,
        /// (variable_name, coefficient) pairs.
        terms: Vec<(String, i64)>,
    },

    /// `target == max(vars)`, with `max(∅) = 0`.
    MaxEquality {
        /// Integer variable being defined.
        target: String,
        /// Integer variables.
        vars: Vec<String>,
    },

    /// Symmetry breaking for interchangeable resources.
    ///
    /// `rows[r][k]` is the literal "item `k` uses resource `r`". The first
    /// true item of row `r + 1` comes strictly after the first true item of
    /// row `r`, and rows with no true literal come after all used rows.
    FirstUseOrder {
        /// One row of boolean literals per resource, all the same length.
        rows: Vec<Vec<String>>,
    },
}

/// Objective function for the CP model.
#[derive(Debug, Clone)]
pub enum Objective {
    /// Minimize a linear combination of integer variables.
    Minimize {
        /// (variable_name, coefficient) pairs.
        terms: Vec<(String, f64)>,
    },
}

impl Objective {
    /// Evaluates the objective under a solution.
    ///
    /// Returns `None` if a term has no assigned value.
    pub fn evaluate(&self, solution: &CpSolution) -> Option<f64> {
        let Objective::Minimize { terms } = self;
        terms.iter().try_fold(0.0, |acc, (name, coef)| {
            solution.value_of(name).map(|v| acc + coef * v as f64)
        })
    }
}

/// A constraint programming model.
///
/// Contains variables, constraints, and an optional objective function.
///
/// # Examples
///
/// ```
/// use u_makespan::cp::{BoolVar, Constraint, CpModel, IntVar, Objective};
///
/// let mut model = CpModel::new("example");
/// model.add_bool_var(BoolVar::new("a"));
/// model.add_bool_var(BoolVar::new("b"));
/// model.add_int_var(IntVar::new("total", 0, 10));
/// model.add_exactly_one(vec!["a".into(), "b".into()]);
/// model.add_linear_eq("total".into(), vec![("a".into(), 3), ("b".into(), 7)]);
/// model.set_objective(Objective::Minimize {
///     terms: vec![("total".into(), 1.0)],
/// });
/// assert!(model.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CpModel {
    /// Model name.
    pub name: String,
    /// Integer variables.
    pub int_vars: HashMap<String, IntVar>,
    /// Boolean variables.
    pub bool_vars: HashMap<String, BoolVar>,
    /// Constraints.
    pub constraints: Vec<Constraint>,
    /// Objective function.
    pub objective: Option<Objective>,
}

impl CpModel {
    /// Creates a new empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            int_vars: HashMap::new(),
            bool_vars: HashMap::new(),
            constraints: Vec::new(),
            objective: None,
        }
    }

    /// Adds an integer variable.
    pub fn add_int_var(&mut self, var: IntVar) {
        self.int_vars.insert(var.name.clone(), var);
    }

    /// Adds a boolean variable.
    pub fn add_bool_var(&mut self, var: BoolVar) {
        self.bool_vars.insert(var.name.clone(), var);
    }

    /// Adds a constraint.
    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    /// Convenience: add an exactly-one constraint.
    pub fn add_exactly_one(&mut self, literals: Vec<String>) {
        self.constraints.push(Constraint::ExactlyOne { literals });
    }

    /// Convenience: add a linear equality constraint.
    pub fn add_linear_eq(&mut self, target: String, terms: Vec<(String, i64)>) {
        self.constraints.push(Constraint::LinearEq { target, terms });
    }

    /// Convenience: add a max-equality constraint.
    pub fn add_max_equality(&mut self, target: String, vars: Vec<String>) {
        self.constraints.push(Constraint::MaxEquality { target, vars });
    }

    /// Sets the objective function.
    pub fn set_objective(&mut self, objective: Objective) {
        self.objective = Some(objective);
    }

    fn has_var(&self, name: &str) -> bool {
        self.int_vars.contains_key(name) || self.bool_vars.contains_key(name)
    }

    fn require_int(&self, name: &str) -> Result<(), String> {
        if self.int_vars.contains_key(name) {
            Ok(())
        } else {
            Err(format!("undefined integer variable: {name}"))
        }
    }

    fn require_bool(&self, name: &str) -> Result<(), String> {
        if self.bool_vars.contains_key(name) {
            Ok(())
        } else {
            Err(format!("undefined boolean variable: {name}"))
        }
    }

    /// Validates the model for consistency.
    ///
    /// Checks that all referenced variable names exist with the right kind.
    pub fn validate(&self) -> Result<(), String> {
        for constraint in &self.constraints {
            match constraint {
                Constraint::ExactlyOne { literals } => {
                    if literals.is_empty() {
                        return Err("exactly-one over an empty literal set".into());
                    }
                    for name in literals {
                        self.require_bool(name)?;
                    }
                }
                Constraint::LinearEq { target, terms } => {
                    self.require_int(target)?;
                    for (name, _) in terms {
                        if !self.has_var(name) {
                            return Err(format!("undefined variable: {name}"));
                        }
                    }
                }
                Constraint::MaxEquality { target, vars } => {
                    self.require_int(target)?;
                    for name in vars {
                        self.require_int(name)?;
                    }
                }
                Constraint::FirstUseOrder { rows } => {
                    let width = rows.first().map_or(0, Vec::len);
                    if rows.iter().any(|row| row.len() != width) {
                        return Err("first-use order: rows have different lengths".into());
                    }
                    for name in rows.iter().flatten() {
                        self.require_bool(name)?;
                    }
                }
            }
        }

        if let Some(Objective::Minimize { terms }) = &self.objective {
            for (name, _) in terms {
                self.require_int(name)?;
            }
        }
        Ok(())
    }

    /// Checks a complete assignment against every domain and constraint.
    ///
    /// Returns a description of the first violation found.
    pub fn check(&self, solution: &CpSolution) -> Result<(), String> {
        for (name, var) in &self.bool_vars {
            match solution.bool_vars.get(name) {
                Some(&value) if var.admits(value) => {}
                Some(_) => return Err(format!("{name}: value conflicts with fixed value")),
                None => return Err(format!("{name}: unassigned")),
            }
        }
        for (name, var) in &self.int_vars {
            match solution.int_vars.get(name) {
                Some(&value) if var.contains(value) => {}
                Some(&value) => {
                    return Err(format!(
                        "{name}: value {value} outside [{}, {}]",
                        var.min, var.max
                    ))
                }
                None => return Err(format!("{name}: unassigned")),
            }
        }

        for constraint in &self.constraints {
            check_constraint(constraint, solution)?;
        }
        Ok(())
    }

    /// Returns the number of boolean variables.
    pub fn bool_var_count(&self) -> usize {
        self.bool_vars.len()
    }

    /// Returns the number of integer variables.
    pub fn int_var_count(&self) -> usize {
        self.int_vars.len()
    }

    /// Returns the number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

fn check_constraint(constraint: &Constraint, solution: &CpSolution) -> Result<(), String> {
    let value = |name: &str| {
        solution
            .value_of(name)
            .ok_or_else(|| format!("{name}: unassigned"))
    };

    match constraint {
        Constraint::ExactlyOne { literals } => {
            let mut count = 0;
            for name in literals {
                count += value(name)?;
            }
            if count != 1 {
                return Err(format!(
                    "exactly-one violated: {count} of {} literals true",
                    literals.len()
                ));
            }
        }
        Constraint::LinearEq { target, terms } => {
            let mut sum = 0i64;
            for (name, coef) in terms {
                sum += coef * value(name)?;
            }
            let lhs = value(target)?;
            if lhs != sum {
                return Err(format!("{target} = {lhs}, expected {sum}"));
            }
        }
        Constraint::MaxEquality { target, vars } => {
            let mut max = 0i64;
            for name in vars {
                max = max.max(value(name)?);
            }
            let lhs = value(target)?;
            if lhs != max {
                return Err(format!("{target} = {lhs}, expected max {max}"));
            }
        }
        Constraint::FirstUseOrder { rows } => {
            let mut previous: Option<usize> = None;
            let mut seen_empty = false;
            for (r, row) in rows.iter().enumerate() {
                let mut first = None;
                for (k, name) in row.iter().enumerate() {
                    if value(name)? == 1 {
                        first = Some(k);
                        break;
                    }
                }
                match first {
                    None => seen_empty = true,
                    Some(_) if seen_empty => {
                        return Err(format!("first-use order: row {r} used after an empty row"))
                    }
                    Some(k) => {
                        if previous.is_some_and(|p| k <= p) {
                            return Err(format!("first-use order: row {r} starts at {k}"));
                        }
                        previous = Some(k);
                    }
                }
            }
        }
    }
    Ok(())
}
