pub mod registry;

pub use registry::{
    default_name, DirectoryRegistry, DirectoryUpdate, WorkDirectory, FALLBACK_DIRECTORY_NAME,
};
