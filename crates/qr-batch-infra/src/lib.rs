//! Infrastructure layer - CSV reading, QR rendering, output directory handling

pub mod output_dir;
pub mod qr_renderer;
pub mod record_reader;

pub use output_dir::ensure_output_directory;
pub use qr_renderer::QrRenderer;
pub use record_reader::RecordReader;
