//! Fixed-point numeric helpers for the redemption walk.
//!
//! All values are `U256` in the protocol's 1e18 scale. Arithmetic on
//! vessel-supplied amounts uses checked operations; a wrapped or truncated
//! intermediate would produce an economically wrong hint.

use alloy::primitives::U256;
use pilot_common::error::HintError;
use pilot_common::types::Parameters;

/// Convert a loan-to-value ratio into an individual collateralization
/// ratio: `icr = (100 * decimalPrecision) / nltv`.
///
/// `nltv` is the plain percentage figure the sorting service reports
/// (e.g. 125 for a vessel at 125% LTV), so the result lands on the 1e18
/// scale used by the on-chain MCR.
pub fn convert_ltv_to_icr(nltv: U256, params: &Parameters) -> Result<U256, HintError> {
    if nltv.is_zero() {
        return Err(HintError::DivisionByZero("LTV to ICR conversion"));
    }
    Ok(U256::from(100u64) * params.decimal_precision / nltv)
}

/// Nominal collateralization ratio: `(coll * decimalPrecision) / debt`.
///
/// A zero debt yields the maximum representable ratio, i.e. "infinitely
/// safe", rather than a division error.
pub fn compute_nominal_cr(coll: U256, debt: U256, params: &Parameters) -> Result<U256, HintError> {
    if debt.is_zero() {
        return Ok(U256::MAX);
    }
    let scaled = coll
        .checked_mul(params.decimal_precision)
        .ok_or(HintError::Overflow("nominal CR"))?;
    Ok(scaled / debt)
}

/// Net debt of a vessel given its raw (recorded + pending) debt.
///
/// Identity in the base protocol. The hook exists so variants with a debt
/// floor surcharge can substitute their own adjustment without touching
/// the walk.
pub fn net_debt_of(raw_debt: U256) -> U256 {
    raw_debt
}

/// Composite debt a vessel carries after a partial redemption.
///
/// Identity in the base protocol; see [`net_debt_of`].
pub fn composite_debt_of(debt: U256) -> U256 {
    debt
}

/// Collateral released for `max_redeemable_debt` at the snapshot price,
/// with the redemption softening factor applied.
///
/// Softening is applied after the debt-to-collateral conversion; the order
/// affects integer rounding and must match the on-chain computation.
pub fn collateral_lot(max_redeemable_debt: U256, params: &Parameters) -> Result<U256, HintError> {
    if params.asset_price.is_zero() {
        return Err(HintError::DivisionByZero("collateral lot conversion"));
    }
    let converted = max_redeemable_debt
        .checked_mul(params.decimal_precision)
        .ok_or(HintError::Overflow("collateral lot conversion"))?
        / params.asset_price;
    let softened = converted
        .checked_mul(params.redemption_softening_bps)
        .ok_or(HintError::Overflow("redemption softening"))?;
    Ok(softened / params.percentage_precision)
}
