pub mod kp;
pub mod xras_kp;
