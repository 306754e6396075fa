//! Aggregation behavior over scripted venue plugins

use std::sync::Arc;

use chainhopper::mocks::{demo_chain, demo_request, ScriptedVenue, VenueScript};
use chainhopper::{Aggregator, Amount, QuoteContext, QuoteSource, QuoteTier, SourceRegistry};

fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn context(chain_id: &str) -> QuoteContext {
	let chain = demo_chain(chain_id);
	QuoteContext {
		token_in: chain.tokens[0].clone(),
		token_out: chain.tokens[1].clone(),
		gas_price: Amount::from(20_000_000_000u64),
		native_decimals: chain.native_currency.decimals,
		native_usd: Some(2_500.0),
		token_out_usd: Some(1.0),
	}
}

fn aggregator(sources: Vec<Arc<dyn QuoteSource>>) -> Aggregator {
	let mut registry = SourceRegistry::new();
	for source in sources {
		registry.register(source);
	}
	Aggregator::new(Arc::new(registry))
}

#[tokio::test]
async fn best_quote_beats_every_individual_venue() {
	init_tracing();
	let outputs = [100u64, 105, 95];
	let agg = aggregator(
		outputs
			.iter()
			.enumerate()
			.map(|(i, out)| {
				ScriptedVenue::new(
					&format!("venue-{}", i),
					"demo",
					VenueScript::Quote {
						amount_out: *out,
						gas_estimate: 150_000,
						tier: QuoteTier::Live,
					},
				) as Arc<dyn QuoteSource>
			})
			.collect(),
	);

	let quote = agg
		.best_quote(&demo_request("demo", 50), &context("demo"))
		.await
		.unwrap();

	assert_eq!(quote.amount_out, Amount::from(105u64));
	assert_eq!(quote.venue, "venue-1");
	for out in outputs {
		assert!(quote.amount_out >= Amount::from(out));
	}
}

#[tokio::test]
async fn failing_venues_do_not_block_the_winner() {
	init_tracing();
	let agg = aggregator(vec![
		ScriptedVenue::new("broken", "demo", VenueScript::Fail),
		ScriptedVenue::new("routeless", "demo", VenueScript::NoRoute),
		ScriptedVenue::new(
			"healthy",
			"demo",
			VenueScript::Quote {
				amount_out: 42,
				gas_estimate: 100_000,
				tier: QuoteTier::Live,
			},
		),
	]);

	let quote = agg
		.best_quote(&demo_request("demo", 50), &context("demo"))
		.await
		.unwrap();
	assert_eq!(quote.venue, "healthy");
}

#[tokio::test]
async fn stalled_venue_is_timed_out_not_awaited() {
	init_tracing();
	let agg = aggregator(vec![
		ScriptedVenue::new("stalled", "demo", VenueScript::Stall { amount_out: 999 }),
		ScriptedVenue::new(
			"prompt",
			"demo",
			VenueScript::Quote {
				amount_out: 10,
				gas_estimate: 100_000,
				tier: QuoteTier::Live,
			},
		),
	])
	.with_timeout_ms(100);

	let quote = agg
		.best_quote(&demo_request("demo", 50), &context("demo"))
		.await
		.unwrap();
	// The stalled venue's better price never arrives in time
	assert_eq!(quote.venue, "prompt");
}

#[tokio::test]
async fn degraded_estimates_compete_when_nothing_is_live() {
	init_tracing();
	let agg = aggregator(vec![
		ScriptedVenue::new(
			"estimate-a",
			"demo",
			VenueScript::Quote {
				amount_out: 9_900,
				gas_estimate: 150_000,
				tier: QuoteTier::Degraded,
			},
		),
		ScriptedVenue::new(
			"estimate-b",
			"demo",
			VenueScript::Quote {
				amount_out: 9_850,
				gas_estimate: 150_000,
				tier: QuoteTier::Degraded,
			},
		),
	]);

	let quote = agg
		.best_quote(&demo_request("demo", 50), &context("demo"))
		.await
		.unwrap();
	assert_eq!(quote.venue, "estimate-a");
	assert_eq!(quote.tier, QuoteTier::Degraded);
}

#[tokio::test]
async fn no_usable_venue_yields_no_quote() {
	init_tracing();
	let agg = aggregator(vec![
		ScriptedVenue::new("broken", "demo", VenueScript::Fail),
		ScriptedVenue::new("routeless", "demo", VenueScript::NoRoute),
	]);

	assert!(agg
		.best_quote(&demo_request("demo", 50), &context("demo"))
		.await
		.is_none());
}

#[tokio::test]
async fn slippage_floor_is_exact() {
	init_tracing();
	let agg = aggregator(vec![ScriptedVenue::new(
		"venue",
		"demo",
		VenueScript::Quote {
			amount_out: 10_000,
			gas_estimate: 100_000,
			tier: QuoteTier::Live,
		},
	)]);

	let quote = agg
		.best_quote(&demo_request("demo", 50), &context("demo"))
		.await
		.unwrap();
	assert_eq!(quote.min_amount_out, Amount::from(9_950u64));
	assert!(quote.min_amount_out < quote.amount_out);

	let quote = agg
		.best_quote(&demo_request("demo", 0), &context("demo"))
		.await
		.unwrap();
	assert_eq!(quote.min_amount_out, quote.amount_out);
}

#[tokio::test]
async fn venue_fee_shows_up_in_the_breakdown() {
	init_tracing();
	let agg = aggregator(vec![ScriptedVenue::with_fee_bps(
		"fee-venue",
		"demo",
		VenueScript::Quote {
			amount_out: 1_000_000,
			gas_estimate: 100_000,
			tier: QuoteTier::Live,
		},
		20,
	)]);

	let quote = agg
		.best_quote(&demo_request("demo", 0), &context("demo"))
		.await
		.unwrap();
	let venue_fee = quote.fees.venue.unwrap();
	// 20 bps of the output
	assert_eq!(venue_fee.native, Amount::from(2_000u64));
}
