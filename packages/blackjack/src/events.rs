use serde::{Deserialize, Serialize};

use crate::{HandOutcome, Move, Variant};

/// Which of a seat's two hands an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveHand {
    Main,
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableContext {
    pub table_id: u32,
    pub min_bet: u64,
    pub max_bet: u64,
    pub seats: usize,
}

/// Settlement of one finalized hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    pub seat: usize,
    pub hand: ActiveHand,
    pub outcome: HandOutcome,
    pub wagered: u64,
    pub returned: u64,
    pub net_winnings: i64,
    pub is_blackjack: bool,
    pub table: TableContext,
    pub variant: Variant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDecision {
    pub seat: usize,
    pub player_action: Move,
    pub optimal_action: Move,
    pub is_optimal: bool,
    pub hand_total: u8,
    pub dealer_up_value: u8,
}

/// Outbox entries produced by round transitions, drained by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    HandResult(HandResult),
    StrategyDecision(StrategyDecision),
}

/// Statistics collaborator fed from the round's events.
pub trait StatisticsSink {
    fn record_hand_result(
        &mut self,
        outcome: HandOutcome,
        net_winnings: i64,
        is_blackjack: bool,
        table: &TableContext,
        variant: Variant,
    );

    fn record_strategy_decision(
        &mut self,
        player_action: Move,
        optimal_action: Move,
        is_optimal: bool,
        hand_total: u8,
        dealer_up_value: u8,
    );
}

pub fn dispatch<S>(events: impl IntoIterator<Item = RoundEvent>, sink: &mut S)
where
    S: StatisticsSink + ?Sized,
{
    for event in events {
        match event {
            RoundEvent::HandResult(result) => sink.record_hand_result(
                result.outcome,
                result.net_winnings,
                result.is_blackjack,
                &result.table,
                result.variant,
            ),
            RoundEvent::StrategyDecision(decision) => sink.record_strategy_decision(
                decision.player_action,
                decision.optimal_action,
                decision.is_optimal,
                decision.hand_total,
                decision.dealer_up_value,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        results: Vec<(HandOutcome, i64)>,
        decisions: Vec<bool>,
    }

    impl StatisticsSink for Recorder {
        fn record_hand_result(
            &mut self,
            outcome: HandOutcome,
            net_winnings: i64,
            _is_blackjack: bool,
            _table: &TableContext,
            _variant: Variant,
        ) {
            self.results.push((outcome, net_winnings));
        }

        fn record_strategy_decision(
            &mut self,
            _player_action: Move,
            _optimal_action: Move,
            is_optimal: bool,
            _hand_total: u8,
            _dealer_up_value: u8,
        ) {
            self.decisions.push(is_optimal);
        }
    }

    #[test]
    fn test_dispatch_routes_each_event() {
        let table = TableContext {
            table_id: 1,
            min_bet: 10,
            max_bet: 100,
            seats: 1,
        };
        let events = vec![
            RoundEvent::StrategyDecision(StrategyDecision {
                seat: 0,
                player_action: Move::Stand,
                optimal_action: Move::Hit,
                is_optimal: false,
                hand_total: 16,
                dealer_up_value: 10,
            }),
            RoundEvent::HandResult(HandResult {
                seat: 0,
                hand: ActiveHand::Main,
                outcome: HandOutcome::Loss,
                wagered: 10,
                returned: 0,
                net_winnings: -10,
                is_blackjack: false,
                table,
                variant: Variant::Vegas,
            }),
        ];

        let mut recorder = Recorder::default();
        dispatch(events, &mut recorder);
        assert_eq!(recorder.results, vec![(HandOutcome::Loss, -10)]);
        assert_eq!(recorder.decisions, vec![false]);
    }
}
