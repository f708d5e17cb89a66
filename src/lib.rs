// src/lib.rs
//
// Calculatrice IVS : noyau d’évaluation (f64) + interface egui.

pub mod app;
pub mod noyau;

pub use noyau::{evaluate, interpret, parse};
