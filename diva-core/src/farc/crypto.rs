//! AES helpers for archive entries and the encrypted `FARC_FT` header.
//!
//! Without the `crypto` feature every function fails with
//! [`FarcError::MissingCrypto`].

use super::FarcError;

#[cfg(feature = "crypto")]
use aes::cipher::{
    block_padding::{NoPadding, Pkcs7},
    BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit,
};

#[cfg(feature = "crypto")]
type EcbEnc = ecb::Encryptor<aes::Aes128>;
#[cfg(feature = "crypto")]
type EcbDec = ecb::Decryptor<aes::Aes128>;
#[cfg(feature = "crypto")]
type CbcEnc = cbc::Encryptor<aes::Aes128>;
#[cfg(feature = "crypto")]
type CbcDec = cbc::Decryptor<aes::Aes128>;

#[cfg_attr(not(feature = "crypto"), allow(dead_code))]
const ECB_KEY: [u8; 16] = *b"project_diva.bin";

#[cfg_attr(not(feature = "crypto"), allow(dead_code))]
const CBC_KEY: [u8; 16] = [
    0x13, 0x72, 0xD5, 0x7B, 0x6E, 0x9E, 0x31, 0xEB, 0xA2, 0x39, 0xB8, 0x3C, 0x15, 0x57, 0xC6, 0xBB,
];

pub(crate) const BLOCK: usize = 16;

#[cfg(not(feature = "crypto"))]
fn missing(variant: &'static str) -> FarcError {
    FarcError::MissingCrypto { variant }
}

/// Zero-fill `data` to the block size and encrypt it in place.
pub(crate) fn ecb_encrypt(data: &mut Vec<u8>) -> Result<(), FarcError> {
    #[cfg(feature = "crypto")]
    {
        let len = data.len();
        data.resize(super::round_up(len, BLOCK), 0);
        let padded = data.len();
        EcbEnc::new(&ECB_KEY.into())
            .encrypt_padded_mut::<NoPadding>(data, padded)
            .map_err(|_| FarcError::Crypto("ECB input is not block aligned"))?;
        Ok(())
    }
    #[cfg(not(feature = "crypto"))]
    {
        let _ = data;
        Err(missing("FARC"))
    }
}

/// Decrypt block-aligned `data` in place.
pub(crate) fn ecb_decrypt(data: &mut [u8]) -> Result<(), FarcError> {
    #[cfg(feature = "crypto")]
    {
        EcbDec::new(&ECB_KEY.into())
            .decrypt_padded_mut::<NoPadding>(data)
            .map_err(|_| FarcError::Crypto("ECB data is not block aligned"))?;
        Ok(())
    }
    #[cfg(not(feature = "crypto"))]
    {
        let _ = data;
        Err(missing("FARC"))
    }
}

/// PKCS7-pad and encrypt `data`, returning the IV followed by the
/// ciphertext.
pub(crate) fn cbc_encrypt(data: &[u8], iv: [u8; 16]) -> Result<Vec<u8>, FarcError> {
    #[cfg(feature = "crypto")]
    {
        let ciphertext = CbcEnc::new(&CBC_KEY.into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(data);
        let mut out = Vec::with_capacity(BLOCK + ciphertext.len());
        out.extend_from_slice(&iv);
        out.extend_from_slice(&ciphertext);
        Ok(out)
    }
    #[cfg(not(feature = "crypto"))]
    {
        let _ = (data, iv);
        Err(missing("FARC_FT"))
    }
}

/// Decrypt IV-prefixed `data`. Padding is left in place.
pub(crate) fn cbc_decrypt(data: &[u8]) -> Result<Vec<u8>, FarcError> {
    if data.len() < BLOCK {
        return Err(FarcError::Truncated);
    }
    let mut iv = [0u8; 16];
    iv.copy_from_slice(&data[..BLOCK]);
    let mut out = data[BLOCK..].to_vec();
    cbc_decrypt_blocks(&mut out, iv)?;
    Ok(out)
}

/// Encrypt block-aligned `data` in place without padding.
pub(crate) fn cbc_encrypt_blocks(data: &mut [u8], iv: [u8; 16]) -> Result<(), FarcError> {
    #[cfg(feature = "crypto")]
    {
        let len = data.len();
        CbcEnc::new(&CBC_KEY.into(), &iv.into())
            .encrypt_padded_mut::<NoPadding>(data, len)
            .map_err(|_| FarcError::Crypto("CBC input is not block aligned"))?;
        Ok(())
    }
    #[cfg(not(feature = "crypto"))]
    {
        let _ = (data, iv);
        Err(missing("FARC_FT"))
    }
}

/// Decrypt block-aligned `data` in place without unpadding.
pub(crate) fn cbc_decrypt_blocks(data: &mut [u8], iv: [u8; 16]) -> Result<(), FarcError> {
    #[cfg(feature = "crypto")]
    {
        CbcDec::new(&CBC_KEY.into(), &iv.into())
            .decrypt_padded_mut::<NoPadding>(data)
            .map_err(|_| FarcError::Crypto("CBC data is not block aligned"))?;
        Ok(())
    }
    #[cfg(not(feature = "crypto"))]
    {
        let _ = (data, iv);
        Err(missing("FARC_FT"))
    }
}

#[cfg(all(test, feature = "crypto"))]
mod tests {
    use super::*;

    #[test]
    fn ecb_zero_fills() {
        let mut data = b"test1".to_vec();
        ecb_encrypt(&mut data).unwrap();
        assert_eq!(data.len(), 16);
        ecb_decrypt(&mut data).unwrap();
        assert_eq!(&data[..5], b"test1");
        assert!(data[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn cbc_prefixes_iv_and_pads() {
        let iv = [7u8; 16];
        let out = cbc_encrypt(&[1u8; 16], iv).unwrap();
        assert_eq!(out.len(), 48);
        assert_eq!(&out[..16], &iv);
        let plain = cbc_decrypt(&out).unwrap();
        assert_eq!(&plain[..16], &[1u8; 16]);
        assert_eq!(&plain[16..], &[16u8; 16]);
    }

    #[test]
    fn cbc_blocks_in_place() {
        let mut data = [3u8; 32];
        cbc_encrypt_blocks(&mut data, [0; 16]).unwrap();
        assert_ne!(data, [3u8; 32]);
        cbc_decrypt_blocks(&mut data, [0; 16]).unwrap();
        assert_eq!(data, [3u8; 32]);
        assert!(cbc_decrypt_blocks(&mut [0u8; 15], [0; 16]).is_err());
    }
}
