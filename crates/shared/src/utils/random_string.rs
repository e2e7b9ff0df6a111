use anyhow::Result;
use chrono::NaiveDate;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

const CHARACTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const ORDER_CHARACTERS: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

fn seeded_rng() -> Result<StdRng> {
    let mut seed = [0u8; 32];
    OsRng.try_fill_bytes(&mut seed)?;
    Ok(StdRng::from_seed(seed))
}

fn pick(rng: &mut StdRng, alphabet: &[u8], length: usize) -> String {
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..alphabet.len());
            alphabet[idx] as char
        })
        .collect()
}

pub fn generate_random_string(length: usize) -> Result<String> {
    let mut rng = seeded_rng()?;
    Ok(pick(&mut rng, CHARACTERS, length))
}

/// `MS-YYYYMMDD-XXXXXX`, suffix drawn from an alphabet without look-alikes.
pub fn generate_order_number(date: NaiveDate) -> Result<String> {
    let mut rng = seeded_rng()?;
    let suffix = pick(&mut rng, ORDER_CHARACTERS, 6);
    Ok(format!("MS-{}-{suffix}", date.format("%Y%m%d")))
}
