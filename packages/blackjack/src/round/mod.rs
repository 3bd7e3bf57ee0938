use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::events::{ActiveHand, HandResult, RoundEvent, StrategyDecision, TableContext};
use crate::payout::{insurance_cost, insurance_payout, payout, surrender_refund, winner, Winner};
use crate::strategy::{advise, Advice, Move};
use crate::{dealer_action, legality, Card, DealerAction, Hand, HandOutcome, RuleSet, Shoe, TableLimits};

pub const MAX_SEATS: usize = 7;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Betting,
    Dealing,
    Playing,
    Dealer,
    Finished,
}

/// Whether a requested transition changed the round. Illegal requests are
/// ignored without touching any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    Applied,
    Ignored,
}

/// One seat at the table. A seat holds at most two hands: the main hand and,
/// after a split, the split hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRoundState {
    pub chips: u64,
    pub bet: u64,
    pub hand: Hand,
    pub split_hand: Option<Hand>,
    /// Never exceeds 1: a seat plays at most a main and a split hand.
    pub split_count: u8,
    pub can_double: bool,
    pub can_split: bool,
    pub can_surrender: bool,
    pub can_insurance: bool,
    pub has_split: bool,
    pub has_surrendered: bool,
    pub has_insurance: bool,
    pub insurance_decided: bool,
    pub insurance_bet: u64,
    pub active_hand: ActiveHand,
    pub last_hand_winnings: i64,
}

impl PlayerRoundState {
    pub fn new(chips: u64) -> Self {
        Self {
            chips,
            bet: 0,
            hand: Hand::new(),
            split_hand: None,
            split_count: 0,
            can_double: false,
            can_split: false,
            can_surrender: false,
            can_insurance: false,
            has_split: false,
            has_surrendered: false,
            has_insurance: false,
            insurance_decided: false,
            insurance_bet: 0,
            active_hand: ActiveHand::Main,
            last_hand_winnings: 0,
        }
    }

    /// Seat has a bet down this round.
    pub fn in_round(&self) -> bool {
        self.bet > 0
    }

    pub fn active(&self) -> &Hand {
        match (self.active_hand, &self.split_hand) {
            (ActiveHand::Split, Some(hand)) => hand,
            _ => &self.hand,
        }
    }

    fn active_mut(&mut self) -> &mut Hand {
        match (self.active_hand, &mut self.split_hand) {
            (ActiveHand::Split, Some(hand)) => hand,
            _ => &mut self.hand,
        }
    }

    pub fn hands(&self) -> impl Iterator<Item = (ActiveHand, &Hand)> {
        std::iter::once((ActiveHand::Main, &self.hand))
            .chain(self.split_hand.iter().map(|h| (ActiveHand::Split, h)))
    }

    fn clear_flags(&mut self) {
        self.can_double = false;
        self.can_split = false;
        self.can_surrender = false;
        self.can_insurance = false;
    }

    fn reset(&mut self) {
        let chips = self.chips;
        let last = self.last_hand_winnings;
        *self = Self::new(chips);
        self.last_hand_winnings = last;
    }
}

/// Full state of one table for one round. Every transition is a method call
/// on this record; nothing lives outside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub rules: RuleSet,
    pub limits: TableLimits,
    pub table: TableContext,
    pub phase: RoundPhase,
    pub players: Vec<PlayerRoundState>,
    pub dealer: Hand,
    pub current_seat: usize,
    pub dealer_peeked: bool,
    pub results: Vec<HandResult>,
    #[serde(skip)]
    events: Vec<RoundEvent>,
}

impl Round {
    pub fn new(table_id: u32, rules: RuleSet, limits: TableLimits, chips: &[u64]) -> Result<Self> {
        if chips.is_empty() || chips.len() > MAX_SEATS {
            return Err(Error::InvalidSeatCount(chips.len()));
        }

        Ok(Self {
            rules,
            limits,
            table: TableContext {
                table_id,
                min_bet: limits.min_bet,
                max_bet: limits.max_bet,
                seats: chips.len(),
            },
            phase: RoundPhase::Betting,
            players: chips.iter().map(|&c| PlayerRoundState::new(c)).collect(),
            dealer: Hand::new(),
            current_seat: 0,
            dealer_peeked: false,
            results: Vec::new(),
            events: Vec::new(),
        })
    }

    pub fn chips(&self, seat: usize) -> Option<u64> {
        self.players.get(seat).map(|p| p.chips)
    }

    pub fn dealer_up_card(&self) -> Option<&Card> {
        self.dealer.cards.first()
    }

    pub fn current_player(&self) -> Option<&PlayerRoundState> {
        match self.phase {
            RoundPhase::Playing => self.players.get(self.current_seat),
            _ => None,
        }
    }

    /// Take every event produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Betting ──

    /// Place (or replace) a seat's bet. The stake leaves the chip balance
    /// immediately.
    pub fn place_bet(&mut self, seat: usize, amount: u64) -> Result<Transition> {
        let player = self.players.get(seat).ok_or(Error::InvalidSeat(seat))?;
        if self.phase != RoundPhase::Betting {
            return Ok(Transition::Ignored);
        }

        let available = player.chips + player.bet;
        let min = self.limits.effective_min(available);
        let max = self.limits.max_bet.min(available);
        if available == 0 || amount < min || amount > max {
            return Err(Error::InvalidBet {
                seat,
                amount,
                min,
                max,
            });
        }

        let player = &mut self.players[seat];
        player.chips = available - amount;
        player.bet = amount;
        log::debug!("Seat {seat} bets {amount}");
        Ok(Transition::Applied)
    }

    // ── Dealing ──

    /// Deal the opening cards: one to each betting seat in order, the dealer
    /// up-card, a second card to each seat, then the hole card (face down)
    /// unless the rules deal no hole card.
    pub fn deal(&mut self, shoe: &mut Shoe) -> Result<Transition> {
        if self.phase != RoundPhase::Betting {
            return Ok(Transition::Ignored);
        }
        let seats: Vec<usize> = (0..self.players.len())
            .filter(|&s| self.players[s].in_round())
            .collect();
        if seats.is_empty() {
            return Ok(Transition::Ignored);
        }

        let dealer_cards = if self.rules.no_hole_card { 1 } else { 2 };
        if shoe.remaining() < seats.len() * 2 + dealer_cards {
            return Err(Error::ShoeExhausted);
        }

        self.phase = RoundPhase::Dealing;
        for &seat in &seats {
            self.players[seat].hand.add_card(shoe.deal()?);
        }
        self.dealer.add_card(shoe.deal()?);
        for &seat in &seats {
            self.players[seat].hand.add_card(shoe.deal()?);
        }
        if !self.rules.no_hole_card {
            let mut hole = shoe.deal()?;
            hole.hidden = true;
            self.dealer.add_card(hole);
        }

        let up = self.dealer.cards[0];
        log::debug!("Dealer shows {up}");

        let insurance_offered = legality::can_insurance(&up, &self.rules);
        for player in self.players.iter_mut().filter(|p| p.in_round()) {
            let cost = insurance_cost(player.bet);
            player.can_insurance = insurance_offered && cost > 0 && player.chips >= cost;
            player.insurance_decided = !player.can_insurance;
        }

        if self.players.iter().any(|p| p.can_insurance) {
            log::debug!("Insurance offered");
        } else {
            self.complete_deal();
        }
        Ok(Transition::Applied)
    }

    pub fn take_insurance(&mut self, seat: usize) -> Transition {
        self.decide_insurance(seat, true)
    }

    pub fn decline_insurance(&mut self, seat: usize) -> Transition {
        self.decide_insurance(seat, false)
    }

    fn decide_insurance(&mut self, seat: usize, take: bool) -> Transition {
        if self.phase != RoundPhase::Dealing {
            return Transition::Ignored;
        }
        let Some(player) = self.players.get_mut(seat) else {
            return Transition::Ignored;
        };
        if !player.can_insurance || player.insurance_decided {
            return Transition::Ignored;
        }

        if take {
            let cost = insurance_cost(player.bet);
            player.chips -= cost;
            player.insurance_bet = cost;
            player.has_insurance = true;
            log::debug!("Seat {seat} takes insurance for {cost}");
        }
        player.insurance_decided = true;
        player.can_insurance = false;

        if self.players.iter().all(|p| p.insurance_decided || !p.in_round()) {
            self.complete_deal();
        }
        Transition::Applied
    }

    fn should_peek(&self) -> bool {
        if !self.rules.dealer_peeks_for_blackjack || self.rules.no_hole_card || self.dealer_peeked {
            return false;
        }
        self.dealer_up_card()
            .map(|up| up.rank.is_ace() || up.rank.is_ten_value())
            .unwrap_or(false)
    }

    fn complete_deal(&mut self) {
        if self.should_peek() {
            self.dealer_peeked = true;
            let mut probe = self.dealer.clone();
            probe.reveal();
            if probe.is_natural() {
                log::debug!("Dealer peeks and has blackjack");
                self.dealer.reveal();
                self.finish();
                return;
            }
        }

        self.phase = RoundPhase::Playing;
        self.current_seat = 0;
        self.advance();
    }

    // ── Playing ──

    /// Move to the next hand that still needs a decision, or end the player
    /// turns when none is left.
    fn advance(&mut self) {
        while let Some(player) = self.players.get_mut(self.current_seat) {
            if player.in_round() {
                if !player.hand.is_finished() {
                    player.active_hand = ActiveHand::Main;
                    self.refresh_flags();
                    return;
                }
                if player.split_hand.as_ref().is_some_and(|h| !h.is_finished()) {
                    player.active_hand = ActiveHand::Split;
                    self.refresh_flags();
                    return;
                }
            }
            self.current_seat += 1;
        }

        self.players.iter_mut().for_each(PlayerRoundState::clear_flags);

        let all_dead = self
            .players
            .iter()
            .filter(|p| p.in_round())
            .flat_map(|p| p.hands().map(|(_, h)| h))
            .all(|h| h.is_busted() || h.surrendered);

        if all_dead {
            log::debug!("Every hand busted or surrendered, dealer does not play");
            self.dealer.reveal();
            self.finish();
        } else {
            self.phase = RoundPhase::Dealer;
        }
    }

    fn refresh_flags(&mut self) {
        let rules = self.rules;
        let current = self.current_seat;
        for (seat, player) in self.players.iter_mut().enumerate() {
            player.clear_flags();
            if seat != current || self.phase != RoundPhase::Playing {
                continue;
            }
            let on_main = player.active_hand == ActiveHand::Main;
            let affordable = player.chips >= player.bet;
            let hand = player.active();
            let can_double = legality::can_double(hand, &rules) && affordable;
            let can_split = on_main
                && !player.has_split
                && affordable
                && legality::can_split(hand, &rules, player.split_count);
            let can_surrender = on_main && !player.has_split && legality::can_surrender(hand, &rules);

            player.can_double = can_double;
            player.can_split = can_split;
            player.can_surrender = can_surrender;
        }
    }

    /// Basic-strategy advice for the hand currently waiting on `seat`.
    pub fn advice_for(&self, seat: usize) -> Option<Advice> {
        let player = self.current_player()?;
        if seat != self.current_seat {
            return None;
        }
        let up = self.dealer_up_card()?;
        Some(advise(
            player.active(),
            up,
            player.can_double,
            player.can_split,
            &self.rules,
            player.split_count,
            player.has_split,
        ))
    }

    fn is_turn(&self, seat: usize) -> bool {
        self.phase == RoundPhase::Playing
            && seat == self.current_seat
            && self
                .players
                .get(seat)
                .is_some_and(|p| p.in_round() && !p.active().is_finished())
    }

    fn record_decision(&mut self, seat: usize, player_action: Move) {
        let Some(advice) = self.advice_for(seat) else {
            return;
        };
        let hand_total = self.players[seat].active().value();
        let dealer_up_value = self.dealer_up_card().map(Card::value).unwrap_or(0);
        self.events.push(RoundEvent::StrategyDecision(StrategyDecision {
            seat,
            player_action,
            optimal_action: advice.action,
            is_optimal: advice.action == player_action,
            hand_total,
            dealer_up_value,
        }));
    }

    pub fn hit(&mut self, seat: usize, shoe: &mut Shoe) -> Result<Transition> {
        if !self.is_turn(seat) {
            return Ok(Transition::Ignored);
        }
        let card = shoe.deal()?;
        self.record_decision(seat, Move::Hit);

        let hand = self.players[seat].active_mut();
        hand.add_card(card);
        log::debug!("Seat {seat} hits: {}", hand.to_display());

        if hand.is_finished() {
            self.advance();
        } else {
            self.refresh_flags();
        }
        Ok(Transition::Applied)
    }

    pub fn stand(&mut self, seat: usize) -> Transition {
        if !self.is_turn(seat) {
            return Transition::Ignored;
        }
        self.record_decision(seat, Move::Stand);
        self.players[seat].active_mut().stood = true;
        log::debug!("Seat {seat} stands");
        self.advance();
        Transition::Applied
    }

    pub fn double(&mut self, seat: usize, shoe: &mut Shoe) -> Result<Transition> {
        if !self.is_turn(seat) || !self.players[seat].can_double {
            return Ok(Transition::Ignored);
        }
        let card = shoe.deal()?;
        self.record_decision(seat, Move::Double);

        let player = &mut self.players[seat];
        player.chips -= player.bet;
        let hand = player.active_mut();
        hand.doubled = true;
        hand.add_card(card);
        log::debug!("Seat {seat} doubles: {}", hand.to_display());

        self.advance();
        Ok(Transition::Applied)
    }

    /// Split the main hand into two hands, each dealt one new card.
    pub fn split(&mut self, seat: usize, shoe: &mut Shoe) -> Result<Transition> {
        if !self.is_turn(seat) || !self.players[seat].can_split {
            return Ok(Transition::Ignored);
        }
        if shoe.remaining() < 2 {
            return Err(Error::ShoeExhausted);
        }
        self.record_decision(seat, Move::Split);

        let player = &mut self.players[seat];
        let Some(second) = player.hand.cards.pop() else {
            return Ok(Transition::Ignored);
        };
        player.chips -= player.bet;
        player.split_count += 1;
        player.has_split = true;
        player.hand.from_split = true;

        let mut split_hand = Hand::from_cards(vec![second]);
        split_hand.from_split = true;
        player.hand.add_card(shoe.deal()?);
        split_hand.add_card(shoe.deal()?);
        player.split_hand = Some(split_hand);
        player.active_hand = ActiveHand::Main;
        log::debug!("Seat {seat} splits");

        self.advance();
        Ok(Transition::Applied)
    }

    /// Surrender resolves immediately: half the bet comes back and the hand is
    /// never compared against the dealer.
    pub fn surrender(&mut self, seat: usize) -> Transition {
        if !self.is_turn(seat) || !self.players[seat].can_surrender {
            return Transition::Ignored;
        }
        self.record_decision(seat, Move::Surrender);

        let player = &mut self.players[seat];
        player.hand.surrendered = true;
        player.has_surrendered = true;
        player.chips += surrender_refund(player.bet);
        log::debug!("Seat {seat} surrenders");

        self.advance();
        Transition::Applied
    }

    // ── Dealer ──

    /// One discrete dealer step: reveal the hole card (or deal the delayed
    /// second card), draw one card, or settle once the dealer stands or busts.
    pub fn dealer_step(&mut self, shoe: &mut Shoe) -> Result<Transition> {
        if self.phase != RoundPhase::Dealer {
            return Ok(Transition::Ignored);
        }

        if self.dealer.has_hidden() {
            self.dealer.reveal();
            log::debug!("Dealer reveals: {}", self.dealer.to_display());
            return Ok(Transition::Applied);
        }

        if self.dealer.cards.len() < 2 {
            let card = shoe.deal()?;
            self.dealer.add_card(card);
            log::debug!("Dealer takes second card: {}", self.dealer.to_display());
            return Ok(Transition::Applied);
        }

        let value = self.dealer.evaluate();
        match dealer_action(&self.rules, value.value, value.is_soft) {
            DealerAction::Hit => {
                let card = shoe.deal()?;
                self.dealer.add_card(card);
                log::debug!("Dealer hits: {}", self.dealer.to_display());
            }
            DealerAction::Stand => {
                log::debug!("Dealer stands on {}", value.value);
                self.finish();
            }
        }
        Ok(Transition::Applied)
    }

    /// Run dealer steps until the round is settled.
    pub fn play_dealer(&mut self, shoe: &mut Shoe) -> Result<()> {
        while self.phase == RoundPhase::Dealer {
            self.dealer_step(shoe)?;
        }
        Ok(())
    }

    // ── Finished ──

    fn finish(&mut self) {
        self.phase = RoundPhase::Finished;
        self.current_seat = self.players.len();
        let rules = self.rules;
        let dealer = self.dealer.clone();
        let mut results = Vec::new();

        for (seat, player) in self.players.iter_mut().enumerate() {
            player.clear_flags();
            if !player.in_round() {
                player.last_hand_winnings = 0;
                continue;
            }

            let mut net_total: i64 = 0;
            for (which, hand) in player.hands() {
                let wagered = if hand.doubled { player.bet * 2 } else { player.bet };
                let (outcome, returned) = if hand.surrendered {
                    (HandOutcome::Surrender, surrender_refund(player.bet))
                } else {
                    let returned = payout(wagered, hand, &dealer, &rules);
                    let outcome = match winner(hand, &dealer) {
                        Winner::Player if hand.is_natural() => HandOutcome::Blackjack,
                        Winner::Player => HandOutcome::Win,
                        Winner::Dealer => HandOutcome::Loss,
                        Winner::Push => HandOutcome::Push,
                    };
                    (outcome, returned)
                };
                let net_winnings = returned as i64 - wagered as i64;
                net_total += net_winnings;
                results.push(HandResult {
                    seat,
                    hand: which,
                    outcome,
                    wagered,
                    returned,
                    net_winnings,
                    is_blackjack: hand.is_natural(),
                    table: self.table,
                    variant: rules.variant,
                });
            }

            // Surrender refunds were credited when the hand was surrendered
            let credit: u64 = results
                .iter()
                .filter(|r| r.seat == seat && r.outcome != HandOutcome::Surrender)
                .map(|r| r.returned)
                .sum();
            let insurance_return = insurance_payout(player.insurance_bet, &dealer);
            player.chips += credit + insurance_return;
            player.last_hand_winnings =
                net_total + insurance_return as i64 - player.insurance_bet as i64;
        }

        log::info!(
            "Round settled on table {}: dealer {} ({}), {} hands",
            self.table.table_id,
            dealer.to_display(),
            dealer.value(),
            results.len()
        );

        self.events
            .extend(results.iter().cloned().map(RoundEvent::HandResult));
        self.results = results;
    }

    /// Collect winnings and return to betting with the same chip balances.
    pub fn new_round(&mut self) -> Transition {
        if self.phase != RoundPhase::Finished {
            return Transition::Ignored;
        }
        self.players.iter_mut().for_each(PlayerRoundState::reset);
        self.dealer = Hand::new();
        self.current_seat = 0;
        self.dealer_peeked = false;
        self.results.clear();
        self.phase = RoundPhase::Betting;
        Transition::Applied
    }
}
