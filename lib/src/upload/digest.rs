//! MD5 digests, the `etag` of the API, as lowercase hexadecimal strings.

use std::path::Path;

use md5::{Digest, Md5};
use tokio::io::{AsyncRead, AsyncReadExt};

const BUFFER_SIZE: usize = 64 * 1024;

/// Digest of an in-memory buffer
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}

/// Digest of everything `reader` provides, along with the number of bytes read.
pub async fn reader_md5<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<(String, u64)> {
    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];
    let mut size = 0u64;
    loop {
        let read = reader.read(&mut buffer).await?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
        size += read as u64;
    }
    Ok((hex::encode(hasher.finalize()), size))
}

/// Digest of a local file, streamed in fixed size buffers.
pub async fn file_md5(path: impl AsRef<Path>) -> std::io::Result<String> {
    let file = tokio::fs::File::open(path).await?;
    reader_md5(file).await.map(|(digest, _)| digest)
}
