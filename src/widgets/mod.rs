//! Stateless helpers behind the page widgets: text statistics, colour
//! utilities, the calculators, the scope walkthrough and the
//! counter/greeting copy.

pub mod calculator;
pub mod color;
pub mod feedback;
pub mod scope;
pub mod text;

pub use calculator::{
    Average, CalculationReport, Operator, Outcome, calculate, calculate_average,
    perform_calculations,
};
pub use color::{ColorFormat, color_palette, contrast_color, random_color};
pub use feedback::{age_message, click_message, counter_feedback, greet_user};
pub use scope::{
    LocalScopeReport, ParameterScopeReport, demonstrate_local_scope, parameter_scope_demo,
};
pub use text::{TextAnalysis, TextTransform, analyze_text, transform_text};
