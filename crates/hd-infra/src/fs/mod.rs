mod export_writer;

pub use export_writer::FsExportWriter;
