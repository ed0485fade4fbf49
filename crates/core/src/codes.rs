//! Random opaque identifiers.
//!
//! Neither generator checks for collisions. Callers insert against a unique
//! constraint and regenerate a bounded number of times when it fires.

use rand::RngCore;

/// Random bytes behind a promo code.
pub const PROMO_CODE_BYTES: usize = 4;

/// Random bytes behind a booking ID.
pub const BOOKING_ID_BYTES: usize = 4;

/// Generate a promo code: uppercase hex of [`PROMO_CODE_BYTES`] random bytes.
pub fn generate_promo_code<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0_u8; PROMO_CODE_BYTES];

    rng.fill_bytes(&mut bytes);

    hex::encode_upper(bytes)
}

/// Generate a booking ID: lowercase hex of [`BOOKING_ID_BYTES`] random bytes.
pub fn generate_booking_id<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0_u8; BOOKING_ID_BYTES];

    rng.fill_bytes(&mut bytes);

    hex::encode(bytes)
}
