pub mod resource_table;
pub mod resource_desc;
pub mod wave_container;

pub use resource_table::ResourceTable;
pub use resource_desc::{ResourceDesc, SourceReader};
pub use wave_container::{WaveContainer, WaveFormat, SampleFormat};

#[cfg(test)]
pub mod test_wav;
