//! Adapter and swap-engine behavior without network access

use std::sync::Arc;

use chainhopper::chrono::{Duration, Utc};
use chainhopper::mocks::{demo_chain, demo_request, ScriptedVenue, VenueScript};
use chainhopper::{
	AdapterError, AdapterFactory, Amount, ChainFamily, ChainRegistry, QuoteSource, QuoteTier,
	SourceRegistry, SwapEngine,
};

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn engine_with(sources: Vec<Arc<dyn QuoteSource>>) -> SwapEngine {
	let mut registry = SourceRegistry::new();
	for source in sources {
		registry.register(source);
	}
	SwapEngine::new(demo_chain("demo"), Arc::new(registry))
}

fn live(amount_out: u64) -> Arc<dyn QuoteSource> {
	ScriptedVenue::new(
		"venue",
		"demo",
		VenueScript::Quote {
			amount_out,
			gas_estimate: 100_000,
			tier: QuoteTier::Live,
		},
	)
}

#[tokio::test]
async fn engine_produces_a_quote_end_to_end() {
	init_tracing();
	let engine = engine_with(vec![live(10_000)]);

	let quote = engine
		.get_quote(&demo_request("demo", 50), Amount::from(1_000_000_000u64))
		.await
		.unwrap();

	assert_eq!(quote.amount_out, Amount::from(10_000u64));
	assert_eq!(quote.token_in.symbol, "WETH");
	assert_eq!(quote.token_out.symbol, "USDC");
	assert_eq!(quote.gas_price, Amount::from(1_000_000_000u64));
	assert!(!quote.is_expired());
}

#[tokio::test]
async fn engine_maps_empty_aggregation_to_no_quote() {
	init_tracing();
	let engine = engine_with(vec![ScriptedVenue::new("broken", "demo", VenueScript::Fail)]);

	assert!(matches!(
		engine
			.get_quote(&demo_request("demo", 50), Amount::from(1u64))
			.await,
		Err(AdapterError::NoQuote { .. })
	));
}

#[tokio::test]
async fn engine_rejects_unknown_tokens_before_any_network_call() {
	init_tracing();
	let engine = engine_with(vec![live(10_000)]);

	let mut request = demo_request("demo", 50);
	request.token_out = "DOGE".to_string();
	assert!(matches!(
		engine.get_quote(&request, Amount::from(1u64)).await,
		Err(AdapterError::TokenNotFound { .. })
	));
}

#[tokio::test]
async fn build_re_resolves_routing_instead_of_replaying_the_payload() {
	init_tracing();
	let quoting = engine_with(vec![live(10_000)]);
	let quote = quoting
		.get_quote(&demo_request("demo", 50), Amount::from(1u64))
		.await
		.unwrap();

	// The market moved between quote and build
	let building = engine_with(vec![ScriptedVenue::new(
		"fresher-venue",
		"demo",
		VenueScript::Quote {
			amount_out: 9_000,
			gas_estimate: 80_000,
			tier: QuoteTier::Live,
		},
	)]);

	let tx = building
		.rebuild_transaction(&quote, Amount::from(1u64), |estimate| estimate + estimate / 5)
		.await
		.unwrap();

	assert_eq!(tx.to, "fresher-venue-router");
	assert_eq!(tx.gas_limit, 80_000 + 80_000 / 5);
	assert_eq!(tx.chain_id, "demo");
}

#[tokio::test]
async fn expired_quote_still_builds_via_re_resolution() {
	init_tracing();
	let engine = engine_with(vec![live(10_000)]);
	let mut quote = engine
		.get_quote(&demo_request("demo", 50), Amount::from(1u64))
		.await
		.unwrap();

	quote.expires_at = Utc::now() - Duration::seconds(30);
	assert!(quote.is_expired());

	let tx = engine
		.rebuild_transaction(&quote, Amount::from(1u64), |estimate| estimate)
		.await
		.unwrap();
	assert_eq!(tx.to, "venue-router");
}

#[tokio::test]
async fn factory_builds_every_enabled_family() {
	init_tracing();
	let chains = ChainRegistry::builtin();
	let sources = Arc::new(SourceRegistry::with_defaults(&chains));
	let factory = AdapterFactory::from_registry(&chains, sources).unwrap();

	let evm = factory.get("ethereum").unwrap();
	assert_eq!(evm.family(), ChainFamily::Evm);
	assert!(evm.is_valid_address("0x742d35Cc6634C0532925a3b8D2a27F79c5a85b03"));
	assert!(!evm.is_valid_address("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin"));

	let account = factory.get("solana").unwrap();
	assert_eq!(account.family(), ChainFamily::AccountLedger);
	assert!(account.is_valid_address("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin"));
	assert!(!account.is_valid_address("0x742d35Cc6634C0532925a3b8D2a27F79c5a85b03"));

	let object = factory.get("sui").unwrap();
	assert_eq!(object.family(), ChainFamily::ObjectLedger);
	assert!(object.is_valid_address(
		"0x5d8c1b2f6a3e4c9d0b7a6f5e4d3c2b1a0f9e8d7c6b5a4f3e2d1c0b9a8f7e6d5c"
	));
}

#[tokio::test]
async fn adapter_unit_conversions_round_trip() {
	init_tracing();
	let chains = ChainRegistry::builtin();
	let sources = Arc::new(SourceRegistry::with_defaults(&chains));
	let factory = AdapterFactory::from_registry(&chains, sources).unwrap();
	let adapter = factory.get("ethereum").unwrap();

	let units = adapter.parse_units("1.5", 18).unwrap();
	assert_eq!(units, Amount::from(1_500_000_000_000_000_000u128));
	assert_eq!(adapter.format_units(&units, 18), "1.5");
}
