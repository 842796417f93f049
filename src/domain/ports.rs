use crate::domain::model::FileMapping;
use crate::utils::error::Result;

pub trait Storage {
    fn exists(&self, path: &str) -> bool;
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn create_dir_all(&self, path: &str) -> Result<()>;
}

pub trait ConfigProvider {
    fn source_dir(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn summary_file(&self) -> &str;
    fn file_map(&self) -> &[FileMapping];
    fn null_values(&self) -> &[String];
}
