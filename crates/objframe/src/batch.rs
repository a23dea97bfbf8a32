use log::error;
use rawbuf::{ByteSink, ByteSource};
use rayon::prelude::*;

use crate::{FailureKind, FrameCodec, LENGTH_PREFIX_SIZE, Result};

impl<T> FrameCodec<T>
where
    T: Sync + 'static,
{
    /// Writes one frame per value, in order.
    ///
    /// Values are serialized in parallel, then the whole batch is sized before the
    /// first byte is written: either every frame lands or none does.
    pub fn encode_all<S>(&self, values: &[T], out: &mut S) -> Result<usize>
    where
        S: ByteSink + ?Sized,
    {
        let payloads = values
            .par_iter()
            .map(|value| self.serialize(value))
            .collect::<Result<Vec<_>>>()?;

        let total = payloads
            .iter()
            .map(|payload| LENGTH_PREFIX_SIZE + payload.len())
            .sum();
        out.ensure_capacity(total)?;

        for payload in &payloads {
            self.write_frame(payload, out)?;
        }

        Ok(total)
    }
}

impl<T: 'static> FrameCodec<T> {
    /// Reads frames until the source is exhausted.
    ///
    /// A payload the serializer rejects yields `None` in its slot and reading goes on.
    /// A malformed frame stops the scan, leaving the cursor at its start.
    pub fn decode_all<S>(&self, input: &mut S) -> Vec<Option<T>>
    where
        S: ByteSource + ?Sized,
    {
        let mut values = vec![];

        while !input.is_exhausted() {
            let position = input.position();
            match self.try_decode(input, None) {
                Ok(value) => values.push(value),
                Err(e) if e.kind() == FailureKind::Deserialization => {
                    error!("Skipping undecodable frame at position {position}: {e}");
                    values.push(None);
                }
                Err(e) => {
                    error!("Stopping at malformed frame at position {position}: {e}");
                    break;
                }
            }
        }

        values
    }
}
