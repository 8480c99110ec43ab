use crate::errors::CoreError;
use super::encryption::KdfParams;

/// Magic bytes identifying an encrypted backup file.
pub const MAGIC: &[u8; 4] = b"BTBK";

/// Current backup frame version.
pub const CURRENT_VERSION: u16 = 1;

/// magic(4) + version(2) + kdf_params(12) + salt(16) + nonce(12) + ciphertext_len(8)
pub const HEADER_SIZE: usize = 54;

/// Header of an encrypted backup frame.
#[derive(Debug)]
pub struct BackupHeader {
    pub version: u16,
    pub kdf_params: KdfParams,
    pub salt: [u8; 16],
    pub nonce: [u8; 12],
    pub ciphertext_len: u64,
}

/// Frame an encrypted backup.
///
/// Layout (all integers little-endian):
/// ```text
/// [BTBK: 4B] [version: 2B] [memory_cost: 4B] [time_cost: 4B]
/// [parallelism: 4B] [salt: 16B] [nonce: 12B] [ciphertext_len: 8B]
/// [ciphertext: variable]
/// ```
pub fn write_frame(
    version: u16,
    kdf_params: &KdfParams,
    salt: &[u8; 16],
    nonce: &[u8; 12],
    ciphertext: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + ciphertext.len());

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&version.to_le_bytes());
    buf.extend_from_slice(&kdf_params.memory_cost.to_le_bytes());
    buf.extend_from_slice(&kdf_params.time_cost.to_le_bytes());
    buf.extend_from_slice(&kdf_params.parallelism.to_le_bytes());
    buf.extend_from_slice(salt);
    buf.extend_from_slice(nonce);
    buf.extend_from_slice(&(ciphertext.len() as u64).to_le_bytes());
    buf.extend_from_slice(ciphertext);

    buf
}

fn read_u32(data: &[u8], offset: &mut usize, field: &str) -> Result<u32, CoreError> {
    let bytes: [u8; 4] = data[*offset..*offset + 4]
        .try_into()
        .map_err(|_| CoreError::InvalidFileFormat(format!("Failed to read {field}")))?;
    *offset += 4;
    Ok(u32::from_le_bytes(bytes))
}

/// Parse a backup frame. Returns the header and the ciphertext slice.
pub fn read_frame(data: &[u8]) -> Result<(BackupHeader, &[u8]), CoreError> {
    if data.len() < HEADER_SIZE {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a backup".into(),
        ));
    }

    if &data[0..4] != MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes — not a backup file".into(),
        ));
    }

    let mut offset = 4;

    let version = u16::from_le_bytes([data[offset], data[offset + 1]]);
    offset += 2;

    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let memory_cost = read_u32(data, &mut offset, "KDF memory_cost")?;
    let time_cost = read_u32(data, &mut offset, "KDF time_cost")?;
    let parallelism = read_u32(data, &mut offset, "KDF parallelism")?;

    // Bound the KDF cost so a crafted file can't exhaust memory or CPU.
    if !(8..=1_048_576).contains(&memory_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF memory_cost out of safe range: {memory_cost} KiB (expected 8..1048576)"
        )));
    }
    if !(1..=20).contains(&time_cost) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF time_cost out of safe range: {time_cost} (expected 1..20)"
        )));
    }
    if !(1..=16).contains(&parallelism) {
        return Err(CoreError::InvalidFileFormat(format!(
            "KDF parallelism out of safe range: {parallelism} (expected 1..16)"
        )));
    }

    let mut salt = [0u8; 16];
    salt.copy_from_slice(&data[offset..offset + 16]);
    offset += 16;

    let mut nonce = [0u8; 12];
    nonce.copy_from_slice(&data[offset..offset + 12]);
    offset += 12;

    let len_bytes: [u8; 8] = data[offset..offset + 8]
        .try_into()
        .map_err(|_| CoreError::InvalidFileFormat("Failed to read ciphertext length".into()))?;
    let ciphertext_len = u64::from_le_bytes(len_bytes);
    offset += 8;

    let available = (data.len() - offset) as u64;
    if available < ciphertext_len {
        return Err(CoreError::InvalidFileFormat(format!(
            "File truncated: expected {ciphertext_len} bytes of ciphertext, got {available}"
        )));
    }

    let ciphertext = &data[offset..offset + ciphertext_len as usize];

    let header = BackupHeader {
        version,
        kdf_params: KdfParams {
            memory_cost,
            time_cost,
            parallelism,
        },
        salt,
        nonce,
        ciphertext_len,
    };

    Ok((header, ciphertext))
}
