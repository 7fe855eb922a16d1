pub fn platform() -> &'static dyn PlatformOps {
    &ConcretePlatform
}

pub trait PlatformOps: Sync + Send {
    /// Name the tool is invoked by on this platform.
    fn final_binary_name(&self, base: &str) -> String;
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::UNIX_PLATFORM as ConcretePlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WINDOWS_PLATFORM as ConcretePlatform;
