//! Match construction.

use im::Vector;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::{
    AiProfile, AttackOrder, Difficulty, GameLog, GameRng, Item, LogEvent, MatchConfig, MatchState,
    Phase, Player, PlayerId, RandomSource, ShieldDurability, Team, TeamMap, HUMAN_SEAT,
    PLAYER_COUNT, TEAM_SIZE,
};

/// Cards dealt to each team: 4 swords, 1 twin, 3 shields, 2 bare hands.
pub const TEAM_DECK: [Item; TEAM_SIZE * 2] = [
    Item::Sword,
    Item::Sword,
    Item::Sword,
    Item::Sword,
    Item::Twin,
    Item::Shield,
    Item::Shield,
    Item::Shield,
    Item::Bare,
    Item::Bare,
];

const NAMES: [&str; PLAYER_COUNT] =
    ["YOU", "AI-1", "AI-2", "AI-3", "AI-4", "AI-5", "AI-6", "AI-7", "AI-8", "AI-9"];

/// Builder for a fresh SETUP-phase match.
///
/// ```
/// use verita_falso::core::{Difficulty, Phase};
/// use verita_falso::setup::MatchBuilder;
///
/// let (state, _rng) = MatchBuilder::new().seed(42).difficulty(Difficulty::Hard).build();
/// assert_eq!(state.phase, Phase::Setup);
/// assert_eq!(state.difficulty, Difficulty::Hard);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MatchBuilder {
    config: MatchConfig,
}

impl MatchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.config.difficulty = difficulty;
        self
    }

    /// Deal a match and return it with the RNG that should drive it.
    pub fn build(self) -> (MatchState, GameRng) {
        let mut rng = match self.config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        tracing::debug!(seed = rng.seed(), difficulty = %self.config.difficulty, "dealing match");
        let state = self.deal(&mut rng);
        (state, rng)
    }

    /// Deal a match from an injected random source.
    pub fn deal<R: RandomSource>(&self, rng: &mut R) -> MatchState {
        let team_of = |i: usize| if i < TEAM_SIZE { Team::Verita } else { Team::Falso };
        let seats = |team: Team| -> AttackOrder {
            let offset = if team == Team::Verita { 0 } else { TEAM_SIZE };
            (offset..offset + TEAM_SIZE).map(|i| PlayerId::new(i as u8)).collect()
        };

        let leaders = TeamMap::new(|team| {
            let ids = seats(team);
            ids[rng.below(ids.len())]
        });
        let hands = TeamMap::new(|_| deal_pairs(&mut *rng));

        let players: Vector<Player> = (0..PLAYER_COUNT)
            .map(|i| {
                let id = PlayerId::new(i as u8);
                let team = team_of(i);
                let [a, b] = hands[team][i % TEAM_SIZE];
                let (left, right) = if rng.chance(0.5) { (a, b) } else { (b, a) };
                let is_human = id == HUMAN_SEAT;

                Player {
                    id,
                    name: NAMES[i].to_string(),
                    team,
                    is_human,
                    alive: true,
                    left,
                    right,
                    is_leader: leaders[team] == id,
                    ai: if is_human { AiProfile::default() } else { AiProfile::tiered(i) },
                }
            })
            .collect();

        let attack_order = TeamMap::new(|team| {
            let mut order = seats(team);
            rng.shuffle(&mut order);
            order
        });

        let round_start_team = if rng.chance(0.5) { Team::Verita } else { Team::Falso };

        let mut log = GameLog::new();
        for (team, order) in attack_order.iter() {
            let names = order.iter().map(|id| NAMES[id.index()].to_string()).collect();
            log.push(LogEvent::AttackOrder { team, names });
        }
        log.push(LogEvent::OpeningTeam { team: round_start_team });
        log.push(LogEvent::LeadersHidden);
        log.push(LogEvent::Difficulty(self.config.difficulty));

        MatchState {
            difficulty: self.config.difficulty,
            phase: Phase::Setup,
            round: 1,
            round_start_team,
            acting_team: round_start_team,
            players,
            attack_order,
            cursor: TeamMap::default(),
            attacked_this_round: TeamMap::new(|_| FxHashSet::default()),
            current_attacker: None,
            current_target: None,
            pending_attack: None,
            last_declaration: None,
            shields: ShieldDurability::new(PLAYER_COUNT),
            log,
            winner: None,
        }
    }
}

/// Shuffle one team deck and cut it into two-card hands.
fn deal_pairs<R: RandomSource>(rng: &mut R) -> SmallVec<[[Item; 2]; TEAM_SIZE]> {
    let mut deck = TEAM_DECK;
    rng.shuffle(&mut deck);
    deck.chunks_exact(2).map(|pair| [pair[0], pair[1]]).collect()
}

/// Fresh SETUP-phase match at NORMAL difficulty, seeded from OS entropy.
pub fn create_initial_state() -> MatchState {
    MatchBuilder::new().build().0
}

/// Fresh SETUP-phase match at NORMAL difficulty, dealt from `rng`.
pub fn create_initial_state_with<R: RandomSource>(rng: &mut R) -> MatchState {
    MatchBuilder::new().deal(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Hand, ScriptedRandom, SHIELD_MAX};

    #[test]
    fn test_roster_shape() {
        let (state, _) = MatchBuilder::new().seed(42).build();

        assert_eq!(state.players.len(), PLAYER_COUNT);
        assert_eq!(state.alive_count(Team::Verita), TEAM_SIZE);
        assert_eq!(state.alive_count(Team::Falso), TEAM_SIZE);

        let humans: Vec<_> = state.players.iter().filter(|p| p.is_human).collect();
        assert_eq!(humans.len(), 1);
        assert_eq!(humans[0].id, HUMAN_SEAT);
        assert_eq!(humans[0].name, "YOU");
        assert_eq!(humans[0].ai, AiProfile::default());

        for (i, p) in state.players.iter().enumerate() {
            assert_eq!(p.id.index(), i);
        }
    }

    #[test]
    fn test_one_leader_per_team() {
        for seed in 0..20 {
            let (state, _) = MatchBuilder::new().seed(seed).build();
            for team in Team::ALL {
                let leaders =
                    state.players.iter().filter(|p| p.team == team && p.is_leader).count();
                assert_eq!(leaders, 1, "seed {seed}, team {team}");
            }
        }
    }

    #[test]
    fn test_each_team_holds_its_deck() {
        let (state, _) = MatchBuilder::new().seed(9).build();

        for team in Team::ALL {
            let mut dealt: Vec<Item> = state
                .players
                .iter()
                .filter(|p| p.team == team)
                .flat_map(|p| [p.left, p.right])
                .collect();
            let mut deck = TEAM_DECK.to_vec();
            let key = |i: &Item| *i as u8;
            dealt.sort_by_key(key);
            deck.sort_by_key(key);
            assert_eq!(dealt, deck);
        }
    }

    #[test]
    fn test_attack_orders_are_permutations() {
        let (state, _) = MatchBuilder::new().seed(3).build();

        for team in Team::ALL {
            let mut order: Vec<_> = state.attack_order[team].to_vec();
            order.sort();
            let mut members: Vec<_> =
                state.players.iter().filter(|p| p.team == team).map(|p| p.id).collect();
            members.sort();
            assert_eq!(order, members);
            assert_eq!(state.cursor[team], 0);
            assert!(state.attacked_this_round[team].is_empty());
        }
    }

    #[test]
    fn test_initial_bookkeeping() {
        let (state, _) = MatchBuilder::new().seed(5).build();

        assert_eq!(state.phase, Phase::Setup);
        assert_eq!(state.round, 1);
        assert_eq!(state.acting_team, state.round_start_team);
        assert!(state.current_attacker.is_none());
        assert!(state.last_declaration.is_none());
        assert!(state.winner.is_none());

        for id in PlayerId::all(PLAYER_COUNT) {
            for hand in Hand::BOTH {
                assert_eq!(state.shields.get(id, hand), SHIELD_MAX);
            }
        }

        let lines = state.log.lines();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Order VERITA: "));
        assert!(lines[1].starts_with("Order FALSO: "));
        assert_eq!(lines[3], "Leaders are hidden.");
        assert_eq!(lines[4], "Difficulty: NORMAL");
    }

    #[test]
    fn test_same_seed_same_deal() {
        let (a, _) = MatchBuilder::new().seed(77).build();
        let (b, _) = MatchBuilder::new().seed(77).build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_scripted_deal() {
        // All zeros: first seat of each team leads, VERITA opens.
        let state = create_initial_state_with(&mut ScriptedRandom::constant(0.0));

        assert!(state.players[0].is_leader);
        assert!(state.players[TEAM_SIZE].is_leader);
        assert_eq!(state.round_start_team, Team::Verita);
    }
}
