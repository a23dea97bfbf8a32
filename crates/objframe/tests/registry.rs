use std::sync::Arc;

use objframe::{
    ByteSource, BytesSerializer, CodecRegistry, Error, FrameCodec, Marshallable, Result, SliceSource,
    VecSink,
};

#[test]
fn test_metadata_hooks_write_and_read_nothing() -> Result<()> {
    let mut codec = FrameCodec::new(BytesSerializer::<u32>::new());

    let mut sink = VecSink::new();
    for _ in 0..3 {
        codec.write_marshallable(&mut sink)?;
    }
    assert!(sink.is_empty());

    let bytes = [1, 2, 3];
    let mut source = SliceSource::new(&bytes);
    for _ in 0..3 {
        codec.read_marshallable(&mut source)?;
    }
    assert_eq!(source.remaining(), 3);

    // Behaviour is unchanged after any number of hook round trips.
    let frame = codec.to_frame(&77)?;
    assert_eq!(codec.from_frame(&frame)?, Some(77));

    Ok(())
}

#[test]
fn test_resolve_yields_bound_codec() -> Result<()> {
    let registry = CodecRegistry::new();
    let codec = FrameCodec::new(BytesSerializer::<String>::new());
    assert!(registry.register(codec.clone()).is_none());
    assert!(registry.contains::<String>());

    // The container persisted the codec's metadata: zero bytes.
    let mut metadata = VecSink::new();
    codec.write_marshallable(&mut metadata)?;
    let metadata = metadata.into_inner();

    let first = registry.resolve::<String>(&mut SliceSource::new(&metadata))?;
    let second = registry.resolve::<String>(&mut SliceSource::new(&metadata))?;

    assert!(Arc::ptr_eq(first.serializer(), codec.serializer()));
    assert!(Arc::ptr_eq(first.serializer(), second.serializer()));
    assert_eq!(first.options(), second.options());

    let frame = first.to_frame(&"resolved".to_string())?;
    assert_eq!(second.from_frame(&frame)?.as_deref(), Some("resolved"));

    Ok(())
}

#[test]
fn test_resolve_unregistered_type() {
    let registry = CodecRegistry::new();
    let result = registry.resolve::<u8>(&mut SliceSource::new(&[]));
    assert!(matches!(result, Err(Error::UnregisteredType(name)) if name == "u8"));
}

#[test]
fn test_registry_is_keyed_by_type() {
    let registry = CodecRegistry::new();
    registry.register(FrameCodec::new(BytesSerializer::<u32>::new()));
    registry.register(FrameCodec::new(BytesSerializer::<u64>::new()));
    assert_eq!(registry.len(), 2);

    let replaced = registry.register(FrameCodec::new(BytesSerializer::<u32>::new()));
    assert!(replaced.is_some());
    assert_eq!(registry.len(), 2);

    assert!(registry.remove::<u64>().is_some());
    assert!(registry.get::<u64>().is_none());
    assert!(registry.get::<u32>().is_some());
    assert!(!registry.contains::<i32>());
}

#[test]
fn test_get_or_register_builds_once() {
    let registry = CodecRegistry::new();
    assert!(registry.is_empty());

    let first = registry.get_or_register(|| FrameCodec::new(BytesSerializer::<bool>::new()));
    let second = registry.get_or_register::<bool>(|| unreachable!());
    assert!(Arc::ptr_eq(first.serializer(), second.serializer()));
}

#[test]
fn test_global_registry() -> Result<()> {
    #[derive(Debug, PartialEq)]
    struct Celsius(i16);

    let codec = CodecRegistry::global().get_or_register(|| {
        FrameCodec::new(objframe::FnSerializer::new(
            "celsius",
            |value: &Celsius, buf: &mut Vec<u8>| {
                buf.extend_from_slice(&value.0.to_le_bytes());
                Ok(())
            },
            |bytes: &[u8]| {
                let arr: [u8; 2] = bytes.try_into().map_err(|_| Error::custom("bad length"))?;
                Ok(Some(Celsius(i16::from_le_bytes(arr))))
            },
        ))
    });

    let resolved = CodecRegistry::global().resolve::<Celsius>(&mut SliceSource::new(&[]))?;
    let frame = codec.to_frame(&Celsius(-40))?;
    assert_eq!(resolved.from_frame(&frame)?, Some(Celsius(-40)));

    Ok(())
}
