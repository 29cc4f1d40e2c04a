pub mod astro;
pub mod file;
pub mod gui;
pub mod model;

#[cfg(test)]
pub mod consts;
