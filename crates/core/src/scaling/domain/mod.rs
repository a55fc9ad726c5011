pub mod frame_scaler;
