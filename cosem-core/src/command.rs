//! DLMS service command tags and the Glo (ciphered) command mapping

use crate::error::{CosemError, CosemResult};

/// DLMS service primitive tags
///
/// Covers the plaintext request/response services (including the legacy
/// short-name Read/Write aliases) and their ciphered Glo counterparts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Command {
    ReadRequest = 0x05,
    WriteRequest = 0x06,
    ReadResponse = 0x0C,
    WriteResponse = 0x0D,
    GetRequest = 0xC0,
    SetRequest = 0xC1,
    MethodRequest = 0xC3,
    GetResponse = 0xC4,
    SetResponse = 0xC5,
    MethodResponse = 0xC7,
    GloGetRequest = 0xC8,
    GloSetRequest = 0xC9,
    GloMethodRequest = 0xCB,
    GloGetResponse = 0xCC,
    GloSetResponse = 0xCD,
    GloMethodResponse = 0xCF,
}

/// Plaintext-to-Glo command mapping, total over the plaintext command set.
const GLO_MAP: [(Command, Command); 10] = [
    (Command::ReadRequest, Command::GloGetRequest),
    (Command::GetRequest, Command::GloGetRequest),
    (Command::WriteRequest, Command::GloSetRequest),
    (Command::SetRequest, Command::GloSetRequest),
    (Command::MethodRequest, Command::GloMethodRequest),
    (Command::ReadResponse, Command::GloGetResponse),
    (Command::GetResponse, Command::GloGetResponse),
    (Command::WriteResponse, Command::GloSetResponse),
    (Command::SetResponse, Command::GloSetResponse),
    (Command::MethodResponse, Command::GloMethodResponse),
];

impl Command {
    /// Get the wire tag byte
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Get the command for a wire tag byte
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x05 => Some(Command::ReadRequest),
            0x06 => Some(Command::WriteRequest),
            0x0C => Some(Command::ReadResponse),
            0x0D => Some(Command::WriteResponse),
            0xC0 => Some(Command::GetRequest),
            0xC1 => Some(Command::SetRequest),
            0xC3 => Some(Command::MethodRequest),
            0xC4 => Some(Command::GetResponse),
            0xC5 => Some(Command::SetResponse),
            0xC7 => Some(Command::MethodResponse),
            0xC8 => Some(Command::GloGetRequest),
            0xC9 => Some(Command::GloSetRequest),
            0xCB => Some(Command::GloMethodRequest),
            0xCC => Some(Command::GloGetResponse),
            0xCD => Some(Command::GloSetResponse),
            0xCF => Some(Command::GloMethodResponse),
            _ => None,
        }
    }

    /// Check if this is one of the six ciphered Glo commands
    pub fn is_glo(self) -> bool {
        matches!(
            self,
            Command::GloGetRequest
                | Command::GloSetRequest
                | Command::GloMethodRequest
                | Command::GloGetResponse
                | Command::GloSetResponse
                | Command::GloMethodResponse
        )
    }

    /// Resolve the Glo counterpart of a plaintext command
    ///
    /// Glo commands are not part of the mapping domain and are rejected,
    /// as is any other tag without an entry in the table.
    pub fn to_glo(self) -> CosemResult<Command> {
        GLO_MAP
            .iter()
            .find(|(plain, _)| *plain == self)
            .map(|(_, glo)| *glo)
            .ok_or(CosemError::InvalidCommand(self.tag()))
    }
}
