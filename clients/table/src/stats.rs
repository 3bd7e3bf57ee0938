use blackjack::{HandOutcome, Move, StatisticsSink, TableContext, Variant};

/// In-memory session totals fed from round events.
#[derive(Debug, Default)]
pub struct SessionStats {
    pub hands: u64,
    pub wins: u64,
    pub losses: u64,
    pub pushes: u64,
    pub surrenders: u64,
    pub blackjacks: u64,
    pub net_winnings: i64,
    pub decisions: u64,
    pub optimal_decisions: u64,
    pub biggest_win: i64,
    pub biggest_loss: i64,
}

impl SessionStats {
    /// Share of player decisions that matched the advisor, 0.0 with none.
    pub fn strategy_adherence(&self) -> f64 {
        if self.decisions == 0 {
            return 0.0;
        }
        self.optimal_decisions as f64 / self.decisions as f64
    }

    pub fn print_summary(&self, rounds: usize) {
        println!();
        println!("Rounds played:  {rounds}");
        println!("Hands settled:  {}", self.hands);
        println!(
            "W / L / P:      {} / {} / {}",
            self.wins, self.losses, self.pushes
        );
        println!("Blackjacks:     {}", self.blackjacks);
        println!("Surrenders:     {}", self.surrenders);
        println!("Net winnings:   {:+}", self.net_winnings);
        println!(
            "Best / worst:   {:+} / {:+}",
            self.biggest_win, self.biggest_loss
        );
        println!(
            "Strategy:       {}/{} by the book ({:.1}%)",
            self.optimal_decisions,
            self.decisions,
            self.strategy_adherence() * 100.0
        );
    }
}

impl StatisticsSink for SessionStats {
    fn record_hand_result(
        &mut self,
        outcome: HandOutcome,
        net_winnings: i64,
        is_blackjack: bool,
        table: &TableContext,
        variant: Variant,
    ) {
        log::debug!(
            "Table {} ({variant}): {outcome:?} {net_winnings:+}",
            table.table_id
        );
        self.hands += 1;
        match outcome {
            HandOutcome::Win | HandOutcome::Blackjack => self.wins += 1,
            HandOutcome::Loss => self.losses += 1,
            HandOutcome::Push => self.pushes += 1,
            HandOutcome::Surrender => self.surrenders += 1,
        }
        if is_blackjack {
            self.blackjacks += 1;
        }
        self.net_winnings += net_winnings;
        self.biggest_win = self.biggest_win.max(net_winnings);
        self.biggest_loss = self.biggest_loss.min(net_winnings);
    }

    fn record_strategy_decision(
        &mut self,
        player_action: Move,
        optimal_action: Move,
        is_optimal: bool,
        hand_total: u8,
        dealer_up_value: u8,
    ) {
        if !is_optimal {
            log::debug!(
                "{player_action:?} on {hand_total} vs {dealer_up_value}, book says {optimal_action:?}"
            );
        }
        self.decisions += 1;
        if is_optimal {
            self.optimal_decisions += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack::{dispatch, ActiveHand, HandResult, RoundEvent, StrategyDecision};

    fn result(outcome: HandOutcome, net_winnings: i64) -> RoundEvent {
        RoundEvent::HandResult(HandResult {
            seat: 0,
            hand: ActiveHand::Main,
            outcome,
            wagered: 10,
            returned: (10 + net_winnings) as u64,
            net_winnings,
            is_blackjack: outcome == HandOutcome::Blackjack,
            table: TableContext {
                table_id: 1,
                min_bet: 10,
                max_bet: 500,
                seats: 1,
            },
            variant: Variant::Vegas,
        })
    }

    #[test]
    fn test_tallies_outcomes() {
        let mut stats = SessionStats::default();
        dispatch(
            vec![
                result(HandOutcome::Blackjack, 15),
                result(HandOutcome::Loss, -10),
                result(HandOutcome::Push, 0),
                result(HandOutcome::Surrender, -5),
            ],
            &mut stats,
        );
        assert_eq!(stats.hands, 4);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.blackjacks, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.pushes, 1);
        assert_eq!(stats.surrenders, 1);
        assert_eq!(stats.net_winnings, 0);
        assert_eq!(stats.biggest_win, 15);
        assert_eq!(stats.biggest_loss, -10);
    }

    #[test]
    fn test_strategy_adherence() {
        let mut stats = SessionStats::default();
        assert_eq!(stats.strategy_adherence(), 0.0);

        let decision = |is_optimal| {
            RoundEvent::StrategyDecision(StrategyDecision {
                seat: 0,
                player_action: Move::Stand,
                optimal_action: if is_optimal { Move::Stand } else { Move::Hit },
                is_optimal,
                hand_total: 16,
                dealer_up_value: 10,
            })
        };
        dispatch(
            vec![decision(true), decision(true), decision(true), decision(false)],
            &mut stats,
        );
        assert_eq!(stats.decisions, 4);
        assert_eq!(stats.strategy_adherence(), 0.75);
    }
}
