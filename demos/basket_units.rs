// ============================================================================
// Basket Units Example
// ============================================================================

use basket_units::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Basket Units Example ===\n");

    let weth: TokenAddress = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".parse()?;
    let usdc: TokenAddress = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".parse()?;
    let wbtc: TokenAddress = "0x2260fac5e5542a773aa44fbcfc11bd1bb8b4a3c1".parse()?;

    // Decimals as a ledger would report them; WBTC is left unreadable
    let reader = StaticDecimalReader::new()
        .with_token(weth, 18)
        .with_token(usdc, 6);

    let components = [weth, usdc, wbtc];
    let resolved = resolve_decimals(&reader, &components);
    println!("Resolved decimals: {:?}", resolved.decimals());
    println!("Failed lookups:    {:?}", resolved.failed());

    let prices = [
        Decimal::from_str("3120.55")?,
        Decimal::ONE,
        Decimal::from_str("61250.10")?,
    ];
    let proportions = [
        Decimal::from_str("0.4")?,
        Decimal::from_str("0.2")?,
        Decimal::from_str("0.4")?,
    ];
    let target = Decimal::ONE_HUNDRED;

    for config in [SolverConfig::relaxed(), SolverConfig::strict()] {
        let solver = UnitSolver::new(config)?;
        let decimals = resolved.decimals();
        let report = solver.solve_raw(
            &decimals,
            &prices,
            &proportions,
            target,
            solver.config().tolerance()?,
        )?;

        println!("\nTolerance {}%:", solver.config().percent_error);
        println!("  units:         {:?}", report.result.units);
        println!("  natural unit:  {}", report.result.natural_unit);
        println!("  implied price: {}", report.implied_price);
        println!("  price error:   {}", report.price_error);
        println!("  passes:        {} ({:?})", report.iterations, report.stop_reason);
    }

    // Gate the relaxed result before creation
    let result = UnitSolver::default().solve_with_reader(
        &reader,
        &components,
        &prices,
        &proportions,
        target,
    )?;
    let creation = BasketCreation::from_result(components.to_vec(), result);
    let validator = BasketValidator::new(&reader, &AcceptAllProbe);

    match validator.validate(&creation) {
        Ok(()) => println!("\nBasket creation request accepted"),
        Err(err) => println!("\nBasket creation request rejected: {}", err),
    }

    Ok(())
}
