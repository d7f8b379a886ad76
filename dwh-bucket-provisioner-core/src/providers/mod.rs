//! Local I/O shims used while planning.

// Native filesystem provider implementation
pub(crate) mod filesystem;

/// Type alias for the filesystem provider implementation.
///
/// Resolves to [`NativeFileSystemProvider`](filesystem::NativeFileSystemProvider).
pub type FileSystemProvider = filesystem::NativeFileSystemProvider;
