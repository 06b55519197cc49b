//! Update logic for applying BattleEvent to tracked statistics

use espy_protocol::{BattleEvent, HpStatus, PokemonDetails, PokemonIdent};

use super::battle::{LastMove, PlayerInfo, StatsTracker};
use crate::classify::MoveClass;
use crate::types::CombatantId;

impl StatsTracker {
    /// Apply one event.
    ///
    /// Must be called in log order: damage and faints read the opposing
    /// side's last move as it stands at this point in the log.
    pub fn update(&mut self, event: &BattleEvent) {
        match event {
            // === Battle metadata ===
            BattleEvent::Player {
                side,
                username,
                rating,
            } => {
                self.players[side.index()] = Some(PlayerInfo {
                    username: username.clone(),
                    rating: *rating,
                });
            }

            BattleEvent::Gen(generation) => {
                self.generation = Some(*generation);
            }

            BattleEvent::Tier(tier) => {
                self.tier = Some(tier.clone());
            }

            BattleEvent::Turn(turn) => {
                self.turn = *turn;
            }

            // === Major actions ===
            BattleEvent::Switch {
                pokemon,
                details,
                hp_status,
            }
            | BattleEvent::Drag {
                pokemon,
                details,
                hp_status,
            } => {
                self.handle_switch(pokemon, details, hp_status.as_ref());
            }

            BattleEvent::Move {
                pokemon,
                move_name,
                target: _,
            } => {
                self.handle_move(pokemon, move_name);
            }

            BattleEvent::Faint(pokemon) => {
                self.handle_faint(pokemon);
            }

            // === HP changes ===
            BattleEvent::Damage {
                pokemon,
                hp_status,
                from: _,
            } => {
                self.handle_damage(pokemon, hp_status.as_ref());
            }

            BattleEvent::Heal {
                pokemon,
                hp_status,
                from: _,
            } => {
                if let Some(hp) = hp_status {
                    self.registry.record_hp(&CombatantId::from(pokemon), hp);
                }
            }

            // === Reveals ===
            BattleEvent::Ability {
                pokemon,
                ability,
                from: _,
            } => {
                self.registry
                    .record_ability(&CombatantId::from(pokemon), ability);
            }

            BattleEvent::Item {
                pokemon,
                item,
                from: _,
            } => {
                self.registry.record_item(&CombatantId::from(pokemon), item);
            }

            BattleEvent::EndItem {
                pokemon,
                item,
                from: _,
            } => {
                self.registry
                    .record_item_consumed(&CombatantId::from(pokemon), item);
            }

            // === Battle end ===
            BattleEvent::Win(winner) => {
                self.ended = true;
                self.winner = Some(winner.clone());
            }

            BattleEvent::ForceWin(winner) => {
                self.ended = true;
                self.winner = winner.clone();
            }

            BattleEvent::Tie => {
                self.ended = true;
                self.tie = true;
            }

            BattleEvent::Ignored(_) => {
                // No effect on tracked stats
            }
        }
    }

    fn handle_switch(
        &mut self,
        pokemon: &PokemonIdent,
        details: &PokemonDetails,
        hp_status: Option<&HpStatus>,
    ) {
        let id = self.registry.register_if_absent(pokemon, details);

        if let Some(hp) = hp_status {
            self.registry.record_hp(&id, hp);
        }

        self.active[pokemon.side.index()] = Some(id);
    }

    fn handle_move(&mut self, pokemon: &PokemonIdent, move_name: &str) {
        let actor = CombatantId::from(pokemon);
        self.registry.record_move(&actor, move_name);

        // Unconditional overwrite, even if a different combatant on this side
        // moved last
        self.last_move[pokemon.side.index()] = Some(LastMove {
            actor,
            move_name: move_name.to_string(),
            turn: self.turn,
        });
    }

    /// Apply an HP drop and credit it to the opposing side's last mover.
    ///
    /// The drop is attributed even when it came from poison, hazards or
    /// weather; the log does not say which, only that a move preceded it.
    fn handle_damage(&mut self, pokemon: &PokemonIdent, hp_status: Option<&HpStatus>) {
        let Some(hp) = hp_status else {
            return;
        };

        let target = CombatantId::from(pokemon);
        let old_hp = self.registry.hp_current(&target);
        self.registry.record_hp(&target, hp);

        let Some(old_hp) = old_hp else {
            return;
        };
        let Some(attacker) = self.last_move[pokemon.side.opponent().index()]
            .as_ref()
            .map(|last| last.actor.clone())
        else {
            return;
        };

        // A "damage" event reporting higher HP contributes nothing
        let amount = old_hp.saturating_sub(hp.current);
        self.registry.record_damage(&attacker, &target, amount);
    }

    /// Count a death and credit the opposing side's last mover.
    ///
    /// The knockout always goes to the last mover. The move kill only counts
    /// when that move is a direct attack: a Recover or Stealth Rock cannot
    /// have been the killing blow.
    fn handle_faint(&mut self, pokemon: &PokemonIdent) {
        let target = CombatantId::from(pokemon);
        self.registry.record_faint(&target);

        let Some(last) = self.last_move[pokemon.side.opponent().index()].clone() else {
            tracing::debug!(fainted = %target, "faint with no opposing move to credit");
            return;
        };

        self.registry.record_knockout(&last.actor);

        if let MoveClass::NonAttack(kind) = self.classifier.classify(&last.move_name) {
            tracing::debug!(
                fainted = %target,
                attacker = %last.actor,
                move_name = %last.move_name,
                ?kind,
                "knockout credited without move kill"
            );
            return;
        }

        if self.config.require_same_turn_move_kill && last.turn != self.turn {
            tracing::debug!(
                fainted = %target,
                attacker = %last.actor,
                move_name = %last.move_name,
                move_turn = last.turn,
                faint_turn = self.turn,
                "move kill declined for stale move"
            );
            return;
        }

        self.registry.record_move_kill(&last.actor, &last.move_name);
    }
}
