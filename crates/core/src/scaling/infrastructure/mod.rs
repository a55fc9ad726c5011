pub mod bilinear_scaler;
pub mod lanczos_scaler;

mod resample;
