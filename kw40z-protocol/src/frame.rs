//! Frame encoding and decoding for the KW40Z host interface.
//!
//! Frame format:
//! - START1 (1 byte): 0x55
//! - START2 (1 byte): 0xAA, with bit 0x01 set when the sender wants an OK back
//! - TYPE (1 byte): packet type identifier
//! - LENGTH (1 byte): payload length (0-23)
//! - PAYLOAD (0-23 bytes): type-specific data
//! - TRAILER (1 byte): 0x45
//!
//! There is no checksum; the trailer byte is the only integrity check.

use heapless::Vec;

/// First synchronization byte
pub const START_BYTE_1: u8 = 0x55;

/// Second synchronization byte (flag bits clear)
pub const START_BYTE_2: u8 = 0xAA;

/// Frame terminator
pub const TRAILER_BYTE: u8 = 0x45;

/// Set in START2 when the receiver must answer with an OK packet
pub const RX_CONFIRM_MASK: u8 = 0x01;

/// Host-side "queued for transmit" marker; never valid on the wire
pub const TX_PACKET_MASK: u8 = 0x10;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 23;

/// START1 + START2 + TYPE + LENGTH
pub const HEADER_SIZE: usize = 4;

/// Maximum complete frame size (header + payload + trailer)
pub const MAX_FRAME_SIZE: usize = HEADER_SIZE + MAX_PAYLOAD_SIZE + 1;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Second start byte is not 0xAA with optional flag bits
    InvalidHeader,
    /// Trailer byte mismatch
    InvalidTrailer,
    /// Packet type byte not known to the host
    UnknownPacket(u8),
    /// Payload is too short for the packet type
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Packet type identifier
    pub packet_type: u8,
    /// Sender asks for an OK packet in return
    pub confirm: bool,
    /// Payload data
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame with the given packet type and payload
    pub fn new(packet_type: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            packet_type,
            confirm: false,
            payload: payload_vec,
        })
    }

    /// Create a frame with no payload
    pub fn empty(packet_type: u8) -> Self {
        Self {
            packet_type,
            confirm: false,
            payload: Vec::new(),
        }
    }

    /// Request (or stop requesting) an OK packet from the receiver
    pub fn with_confirm(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }

    /// Total encoded length of this frame
    pub fn encoded_len(&self) -> usize {
        HEADER_SIZE + self.payload.len() + 1
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let mut start2 = START_BYTE_2;
        if self.confirm {
            start2 |= RX_CONFIRM_MASK;
        }

        buffer[0] = START_BYTE_1;
        buffer[1] = start2;
        buffer[2] = self.packet_type;
        buffer[3] = self.payload.len() as u8;
        buffer[HEADER_SIZE..HEADER_SIZE + self.payload.len()].copy_from_slice(&self.payload);
        buffer[frame_len - 1] = TRAILER_BYTE;

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// State machine for parsing incoming frames
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    expected_length: u8,
    packet_type: u8,
    confirm: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for 0x55
    WaitingForStart1,
    /// Got 0x55, waiting for 0xAA (+flags)
    WaitingForStart2,
    /// Waiting for TYPE
    WaitingForType,
    /// Waiting for LENGTH
    WaitingForLength,
    /// Reading payload bytes
    ReadingPayload,
    /// Waiting for 0x45
    WaitingForTrailer,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    /// Create a new frame parser
    pub fn new() -> Self {
        Self {
            state: ParseState::WaitingForStart1,
            buffer: Vec::new(),
            expected_length: 0,
            packet_type: 0,
            confirm: false,
        }
    }

    /// Reset the parser state
    pub fn reset(&mut self) {
        self.state = ParseState::WaitingForStart1;
        self.buffer.clear();
        self.expected_length = 0;
        self.packet_type = 0;
        self.confirm = false;
    }

    /// True while the parser sits between frames
    pub fn is_idle(&self) -> bool {
        self.state == ParseState::WaitingForStart1
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    /// After an error the parser is back to hunting for START1.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::WaitingForStart1 => {
                if byte == START_BYTE_1 {
                    self.state = ParseState::WaitingForStart2;
                }
                // Silently ignore line noise between frames
                Ok(None)
            }
            ParseState::WaitingForStart2 => {
                if byte & !(RX_CONFIRM_MASK | TX_PACKET_MASK) != START_BYTE_2 {
                    self.reset();
                    // A repeated 0x55 may itself be the real start
                    if byte == START_BYTE_1 {
                        self.state = ParseState::WaitingForStart2;
                    }
                    return Err(FrameError::InvalidHeader);
                }
                self.confirm = byte & RX_CONFIRM_MASK != 0;
                self.state = ParseState::WaitingForType;
                Ok(None)
            }
            ParseState::WaitingForType => {
                self.packet_type = byte;
                self.state = ParseState::WaitingForLength;
                Ok(None)
            }
            ParseState::WaitingForLength => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::PayloadTooLarge);
                }
                self.expected_length = byte;
                self.buffer.clear();
                self.state = if byte == 0 {
                    ParseState::WaitingForTrailer
                } else {
                    ParseState::ReadingPayload
                };
                Ok(None)
            }
            ParseState::ReadingPayload => {
                // Cannot overflow: expected_length was bounded above
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::WaitingForTrailer;
                }
                Ok(None)
            }
            ParseState::WaitingForTrailer => {
                if byte != TRAILER_BYTE {
                    self.reset();
                    return Err(FrameError::InvalidTrailer);
                }

                let frame = Frame {
                    packet_type: self.packet_type,
                    confirm: self.confirm,
                    payload: self.buffer.clone(),
                };

                self.reset();
                Ok(Some(frame))
            }
        }
    }

    /// Feed multiple bytes to the parser
    ///
    /// Returns the first complete frame found, if any.
    /// Remaining bytes after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<Option<Frame>, FrameError> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte)? {
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }
}
