//! Square-control analysis: per-square weights and board shading.

mod shading;
mod weights;

pub use shading::{BoardShading, Rgb};
pub use weights::{
    ControlOptions, SquareWeights, attacking_control, central_importance, defending_control,
};
