mod stats;

use anyhow::{bail, Context, Result};
use blackjack::{dispatch, Error, Move, Round, RoundPhase, Shoe, TableLimits, Transition, Variant};
use clap::Parser;

use stats::SessionStats;

#[derive(Parser)]
#[command(
    name = "blackjack-table",
    about = "Autoplay blackjack table driven by the basic-strategy advisor"
)]
struct Cli {
    /// Rule variant: vegas, european or atlantic-city
    #[arg(long, env = "TABLE_VARIANT", default_value = "vegas")]
    variant: Variant,

    /// Occupied seats (1-7)
    #[arg(long, default_value_t = 1)]
    seats: usize,

    #[arg(long, default_value_t = 100)]
    rounds: usize,

    /// Starting chips per seat
    #[arg(long, default_value_t = 1000)]
    chips: u64,

    #[arg(long, default_value_t = 10)]
    min_bet: u64,

    #[arg(long, default_value_t = 500)]
    max_bet: u64,

    /// Flat bet for every seat, clamped to the table limits and the stack
    #[arg(long, default_value_t = 10)]
    bet: u64,

    /// Shoe seed for a reproducible session
    #[arg(long, env = "TABLE_SEED")]
    seed: Option<u64>,

    /// Shoe penetration that triggers a reshuffle between rounds
    #[arg(long, default_value_t = 0.75)]
    reshuffle_at: f64,

    /// Take insurance whenever it is offered
    #[arg(long, default_value_t = false)]
    insurance: bool,

    /// Print a JSON snapshot of every settled round
    #[arg(long, default_value_t = false)]
    snapshots: bool,
}

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("Table failed: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    if !(0.0..=1.0).contains(&cli.reshuffle_at) {
        bail!("--reshuffle-at must be between 0 and 1, got {}", cli.reshuffle_at);
    }

    let rules = cli.variant.rules();
    let limits = TableLimits::new(cli.min_bet, cli.max_bet).context("invalid table limits")?;
    let mut round = Round::new(1, rules, limits, &vec![cli.chips; cli.seats])
        .context("failed to open table")?;
    let mut shoe = match cli.seed {
        Some(seed) => Shoe::new(rules.number_of_decks, seed),
        None => Shoe::from_entropy(rules.number_of_decks),
    };
    log::info!(
        "Opened {} table: {} seats, {} decks, limits {}-{}",
        cli.variant,
        cli.seats,
        shoe.decks(),
        limits.min_bet,
        limits.max_bet
    );

    let mut stats = SessionStats::default();
    let mut played = 0;

    for n in 1..=cli.rounds {
        if shoe.needs_reshuffle(cli.reshuffle_at) {
            log::info!(
                "Reshuffling at {:.0}% penetration",
                shoe.penetration() * 100.0
            );
            shoe.shuffle();
        }

        if !place_bets(&mut round, cli.bet)? {
            log::info!("Every seat is out of chips after {played} rounds");
            break;
        }
        play_round(&mut round, &mut shoe, cli.insurance)
            .with_context(|| format!("round {n}"))?;
        played = n;

        for (seat, player) in round.players.iter().enumerate() {
            if player.in_round() {
                log::debug!(
                    "Seat {seat}: {:+}, {} chips",
                    player.last_hand_winnings,
                    player.chips
                );
            }
        }
        dispatch(round.drain_events(), &mut stats);

        if cli.snapshots {
            println!(
                "{}",
                serde_json::to_string_pretty(&round).context("failed to serialize round")?
            );
        }
        round.new_round();
    }

    stats.print_summary(played);
    for (seat, player) in round.players.iter().enumerate() {
        println!("Seat {seat} chips:  {}", player.chips);
    }
    Ok(())
}

/// Returns false when no seat could bet.
fn place_bets(round: &mut Round, bet: u64) -> Result<bool> {
    let limits = round.limits;
    let mut any = false;
    for seat in 0..round.players.len() {
        let chips = round.players[seat].chips;
        if chips == 0 {
            continue;
        }
        let amount = bet
            .max(limits.effective_min(chips))
            .min(limits.max_bet.min(chips));
        round
            .place_bet(seat, amount)
            .with_context(|| format!("seat {seat} could not bet {amount}"))?;
        any = true;
    }
    Ok(any)
}

fn play_round(round: &mut Round, shoe: &mut Shoe, take_insurance: bool) -> Result<()> {
    match round.deal(shoe) {
        Err(Error::ShoeExhausted) => {
            log::warn!("Shoe ran dry before the deal, reshuffling");
            shoe.shuffle();
            round.deal(shoe)?;
        }
        other => {
            other?;
        }
    }

    if round.phase == RoundPhase::Dealing {
        for seat in 0..round.players.len() {
            if take_insurance {
                round.take_insurance(seat);
            } else {
                round.decline_insurance(seat);
            }
        }
    }

    while round.phase == RoundPhase::Playing {
        let seat = round.current_seat;
        let advice = round
            .advice_for(seat)
            .with_context(|| format!("no advice for seat {seat}"))?;
        log::debug!("Seat {seat}: {:?} ({})", advice.action, advice.reason);

        let applied = match advice.action {
            Move::Hit => round.hit(seat, shoe)?,
            Move::Stand => round.stand(seat),
            Move::Double => round.double(seat, shoe)?,
            Move::Split => round.split(seat, shoe)?,
            Move::Surrender => round.surrender(seat),
        };
        if applied == Transition::Ignored && round.stand(seat) == Transition::Ignored {
            bail!("seat {seat} is stuck in {:?}", round.phase);
        }
    }

    round.play_dealer(shoe)?;
    Ok(())
}
