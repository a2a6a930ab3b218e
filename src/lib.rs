// Ember: board classification and hot keyword recommendation for Dcard-style posts.
//
// This is the library root. Each module corresponds to a major subsystem
// of the prediction pipeline.

pub mod category;
pub mod classifier;
pub mod config;
pub mod keywords;
pub mod output;
pub mod recommend;
pub mod reference;
pub mod scoring;
pub mod titles;
pub mod web;
