//! Cross-descriptor visibility and the unsynchronized concurrency contract

use std::os::fd::OwnedFd;
use std::sync::Arc;
use std::thread;

use bufmeta::{layout, BufferHandle, MetadataKind, MetadataValue};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_descriptor_sees_writes() {
        let writer = BufferHandle::allocate("visibility").unwrap();
        let reader = writer.try_clone().unwrap();

        bufmeta::set(&writer, &MetadataValue::VideoTimestamp(42)).unwrap();
        assert_eq!(
            bufmeta::get(&reader, MetadataKind::VideoTimestamp).unwrap(),
            MetadataValue::VideoTimestamp(42)
        );

        bufmeta::clear(&reader, MetadataKind::VideoTimestamp).unwrap();
        assert!(bufmeta::get(&writer, MetadataKind::VideoTimestamp).is_err());
    }

    #[test]
    fn test_file_backed_descriptor() {
        let file = tempfile::NamedTempFile::new().unwrap();
        file.as_file()
            .set_len(layout::mapped_size() as u64)
            .unwrap();

        let open = |path: &std::path::Path| {
            OwnedFd::from(
                std::fs::OpenOptions::new()
                    .read(true)
                    .write(true)
                    .open(path)
                    .unwrap(),
            )
        };

        // Two handles over independently opened descriptors to the same
        // backing object, the cross-process arrangement.
        let first = BufferHandle::from_descriptor(open(file.path()));
        let second = BufferHandle::from_descriptor(open(file.path()));

        bufmeta::set(&first, &MetadataValue::MapSecureBuffer(1)).unwrap();
        assert_eq!(
            bufmeta::get(&second, MetadataKind::MapSecureBuffer).unwrap(),
            MetadataValue::MapSecureBuffer(1)
        );
    }

    /// The protocol provides no locking; this exercises concurrent writers of
    /// one kind without asserting anything the contract does not promise.
    /// Every writer stores identical bytes, so the final state is well-defined
    /// even though the individual calls race.
    #[test]
    fn test_concurrent_identical_writers() {
        let handle = Arc::new(BufferHandle::allocate("concurrent").unwrap());

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = Arc::clone(&handle);
                thread::spawn(move || {
                    for _ in 0..200 {
                        bufmeta::set(&*handle, &MetadataValue::SingleBufferMode(1)).unwrap();
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(
            bufmeta::get(&*handle, MetadataKind::SingleBufferMode).unwrap(),
            MetadataValue::SingleBufferMode(1)
        );
    }
}
