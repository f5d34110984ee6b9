/*!
    Reusable compressed-packet buffer.
*/

/**
    A reusable buffer holding one compressed packet.

    The demuxer refills this buffer in place on every [`read_into`] call —
    the previous payload is released before the next one lands, so a single
    `PacketBuf` serves an entire decode session without reallocating.

    [`read_into`]: crate::Source::read_into
*/
pub struct PacketBuf {
    pub(crate) inner: ffmpeg_next::Packet,
}

impl PacketBuf {
    /**
        Create an empty packet buffer.
    */
    pub fn empty() -> Self {
        Self {
            inner: ffmpeg_next::Packet::empty(),
        }
    }

    /**
        Index of the elementary stream this packet belongs to.
    */
    pub fn stream_index(&self) -> usize {
        self.inner.stream()
    }

    /**
        Whether the packet starts a keyframe.
    */
    pub fn is_key(&self) -> bool {
        self.inner.is_key()
    }

    /**
        Size of the compressed payload in bytes.
    */
    pub fn len(&self) -> usize {
        self.inner.size()
    }

    /**
        Returns true if the buffer holds no payload.
    */
    pub fn is_empty(&self) -> bool {
        self.inner.size() == 0
    }

    /**
        Access the underlying ffmpeg packet.

        Bridging accessor for the decode crate.
    */
    pub fn as_ffmpeg(&self) -> &ffmpeg_next::Packet {
        &self.inner
    }
}

impl Default for PacketBuf {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for PacketBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PacketBuf")
            .field("stream_index", &self.stream_index())
            .field("len", &self.len())
            .finish()
    }
}
