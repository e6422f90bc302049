use rand::Rng;

pub const PNR_PREFIX: &str = "PNR";
pub const PNR_CODE_LEN: usize = 8;

// No 0/O or 1/I, codes get read out over the phone.
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Random confirmation code such as `PNR7KQ2MXBD`
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut code = String::with_capacity(PNR_PREFIX.len() + PNR_CODE_LEN);
    code.push_str(PNR_PREFIX);
    for _ in 0..PNR_CODE_LEN {
        let i = rng.gen_range(0..ALPHABET.len());
        code.push(char::from(ALPHABET[i]));
    }
    code
}
