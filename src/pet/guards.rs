//! Guard predicates over the pet context.
//!
//! Plain functions so they can be tested on their own; the transition
//! table wraps them in named [`Guard`]s.

use super::context::PetContext;
use crate::core::Guard;

pub fn sufficient_energy_for_play(ctx: &PetContext) -> bool {
    ctx.energy > 5
}

pub fn unhealthy_for_grumpy(ctx: &PetContext) -> bool {
    ctx.hunger >= 5 || ctx.energy <= 5
}

pub fn unhealthy_for_sick(ctx: &PetContext) -> bool {
    ctx.hunger >= 8 || ctx.energy <= 2
}

pub fn is_healthy(ctx: &PetContext) -> bool {
    ctx.hunger < 5 && ctx.energy > 5
}

pub fn play_guard() -> Guard<PetContext> {
    Guard::new("sufficient_energy_for_play", sufficient_energy_for_play)
}

pub fn grumpy_guard() -> Guard<PetContext> {
    Guard::new("unhealthy_for_grumpy", unhealthy_for_grumpy)
}

pub fn sick_guard() -> Guard<PetContext> {
    Guard::new("unhealthy_for_sick", unhealthy_for_sick)
}

pub fn healthy_guard() -> Guard<PetContext> {
    Guard::new("is_healthy", is_healthy)
}
