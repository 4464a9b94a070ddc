pub mod shading;
pub mod ballpit_vis2d;
