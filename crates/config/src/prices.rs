//! Static USD price estimates
//!
//! Live market pricing is out of scope for the core; these rough figures back
//! `get_token_price` and the USD side of fee breakdowns. Stablecoins are
//! pinned at 1.0, majors carry order-of-magnitude estimates.

/// Indicative USD price for a token symbol, if one is tabled
pub fn usd_estimate(symbol: &str) -> Option<f64> {
	let price = match symbol.to_uppercase().as_str() {
		"USDC" | "USDT" | "DAI" | "BUSD" => 1.0,
		"ETH" | "WETH" => 2_500.0,
		"WBTC" | "BTC" => 60_000.0,
		"BNB" | "WBNB" => 550.0,
		"SOL" | "WSOL" => 150.0,
		"SUI" => 1.5,
		"MATIC" | "POL" => 0.5,
		_ => return None,
	};
	Some(price)
}
