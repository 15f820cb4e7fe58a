pub mod wav;

pub use wav::{AudioError, export_mono_wav, load_stereo_pair};
