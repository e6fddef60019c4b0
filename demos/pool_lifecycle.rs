//! Walk one pool through its life: initialize, seed, top up, swap, redeem,
//! then persist it and load it back.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=pair_amm=debug cargo run --example pool_lifecycle
//! ```

use pair_amm::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Two-asset constant-product pool ===\n");

    // ── 1. Engine, accounts and funding ─────────────────────────────────
    let config = EngineConfig::from_toml_str("fee_bps = 10\nratio_policy = \"absorb\"\n")?;
    let mut engine = PoolEngine::new(config, InMemoryLedger::new(), SeededAddressDeriver::default())?;

    let sol = AssetId::from_bytes([1u8; 32]);
    let usdc = AssetId::from_bytes([2u8; 32]);
    let alice = Address::from_bytes([10u8; 32]);
    let bob = Address::from_bytes([11u8; 32]);
    let carol = Address::from_bytes([12u8; 32]);

    engine.ledger_mut().credit(alice, sol, Amount::new(100_000_000))?;
    engine.ledger_mut().credit(alice, usdc, Amount::new(100_000_000))?;
    engine.ledger_mut().credit(bob, sol, Amount::new(50_000_000))?;
    engine.ledger_mut().credit(bob, usdc, Amount::new(50_000_000))?;
    engine.ledger_mut().credit(carol, sol, Amount::new(30_000_000))?;

    // ── 2. Initialize ───────────────────────────────────────────────────
    let key = engine.initialize(sol, usdc)?;
    let addrs = engine.addresses(&key)?;
    println!("Pool {key}");
    println!("  share mint: {}", addrs.share_mint);
    println!("  vault A:    {}", addrs.vault_a);
    println!("  vault B:    {}", addrs.vault_b);

    // ── 3. Seed and top up ──────────────────────────────────────────────
    let seed = engine.add_liquidity(&key, alice, Amount::new(100_000_000), Amount::new(100_000_000))?;
    println!("\nAlice seeds 100M / 100M  -> {} shares", seed.minted);
    let top = engine.add_liquidity(&key, bob, Amount::new(50_000_000), Amount::new(50_000_000))?;
    println!("Bob adds   50M / 50M    -> {} shares", top.minted);
    print_pool(&engine, &key)?;

    // ── 4. Swap with a slippage bound from a quote ──────────────────────
    let amount_in = Amount::new(30_000_000);
    let quote = engine.quote_swap(&key, Side::A, amount_in)?;
    let min_out = Amount::new(quote.amount_out.get() - quote.amount_out.get() / 100);
    println!("\nQuote: {amount_in} A -> {} B (fee {})", quote.amount_out, quote.fee);

    let swap = engine.swap(&key, carol, Side::A, amount_in, min_out)?;
    println!("Carol swaps {} A -> {} B", swap.amount_in, swap.amount_out);
    print_pool(&engine, &key)?;

    // A stale bound now fails and moves nothing.
    match engine.swap(&key, carol, Side::A, Amount::new(1_000), quote.amount_out) {
        Err(err) => println!("\nSecond swap rejected: {err}"),
        Ok(out) => println!("\nSecond swap unexpectedly filled: {}", out.amount_out),
    }

    // ── 5. Redeem ───────────────────────────────────────────────────────
    let out = engine.remove_liquidity(&key, bob, top.minted)?;
    println!(
        "\nBob burns {} shares -> {} A + {} B",
        out.burned, out.amount_a, out.amount_b
    );
    print_pool(&engine, &key)?;

    // ── 6. Persist and reload ───────────────────────────────────────────
    let mut reloaded =
        PoolEngine::new(EngineConfig::default(), InMemoryLedger::new(), SeededAddressDeriver::default())?;
    for record in engine.records() {
        let bytes = record.encode()?;
        println!("\nStored record: {} bytes, {}", bytes.len(), hex::encode(&bytes[64..72]));
        reloaded.restore(&PoolRecord::decode(&bytes)?)?;
    }
    print_pool(&reloaded, &key)?;

    Ok(())
}

fn print_pool<L: Ledger, D: AddressDeriver>(
    engine: &PoolEngine<L, D>,
    key: &PairKey,
) -> Result<(), AmmError> {
    let pool = engine.pool(key)?;
    let price = pool.spot_price(Side::A)?;
    println!(
        "  reserves {} / {}, supply {}, k = {}, price A = {:.6} B",
        pool.reserve_a(),
        pool.reserve_b(),
        pool.share_supply(),
        pool.invariant(),
        price.to_f64()
    );
    Ok(())
}
