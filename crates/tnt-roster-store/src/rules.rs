/*
[INPUT]:  Active team/unit and the unit or item the user picked
[OUTPUT]: RuleViolation describing why the server would refuse the change
[POS]:    Rules layer - pre-flight checks run before purchase and equip requests
[UPDATE]: When the server's recruitment or equipment validation changes
*/

use thiserror::Error;
use tnt_roster_adapter::{InventoryItem, Rank, Team, Unit};

pub const MAX_ELITES: usize = 3;
pub const MAX_SPECIALIST_RATIO: f64 = 0.34;
/// One freelancer per this much battle-strength cost.
pub const BS_COST_PER_FREELANCER: i32 = 200;

const HOLD_NOTHING_SKILLS: [&str; 2] = ["Crushing Claws", "Weapon Growths (x2)"];
const SINGLE_ITEM_SKILLS: [&str; 2] = ["No Arms", "Weapon Growths"];
const THIRD_HAND_SKILLS: [&str; 2] = ["Integral", "Potential Integrated Weapon"];
const ALTERED_SPECIES: [&str; 2] = ["Mutant", "Robot"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("Team cannot afford this unit")]
    CannotAfford { cost: i32, money: i32 },
    #[error("Team cannot have two leaders.")]
    SecondLeader,
    #[error("Team cannot take more than 3 elites.")]
    TooManyElites,
    #[error("Specialists may not exceed more than 1/3rd of the team")]
    TooManySpecialists,
    #[error("Team can only have one freelancer per 200 BS cost")]
    TooManyFreelancers,
    #[error("Team cannot purchase units until it has a leader")]
    LeaderRequired,
    #[error("Unit is already wearing armor.")]
    AlreadyWearingArmor,
    #[error("Unit is incapable of holding items.")]
    CannotHoldItems,
    #[error("Unit can only equip a single 1-handed item.")]
    SingleOneHandedItem,
    #[error("Unit does not have enough hands to hold this item.")]
    NotEnoughHands,
}

pub fn team_must_buy_leader(team: &Team) -> bool {
    team.count_rank(Rank::Leader) == 0
}

pub fn team_can_buy_elite(team: &Team) -> bool {
    team.count_rank(Rank::Elite) < MAX_ELITES
}

pub fn team_can_buy_specialist(team: &Team) -> bool {
    let unit_count = team.unit_list.len();
    if unit_count == 0 {
        return false;
    }
    let specialists = team.count_rank(Rank::Specialist);
    (specialists + 1) as f64 / unit_count as f64 <= MAX_SPECIALIST_RATIO
}

pub fn team_can_buy_freelancer(team: &Team) -> bool {
    let freelancers = team.count_rank(Rank::Freelancer) as i32;
    team.bs_cost / BS_COST_PER_FREELANCER >= freelancers + 1
}

/// Recruitment check for `candidate` (a reference unit from the purchase list).
pub fn check_purchase(team: &Team, candidate: &Unit) -> Result<(), RuleViolation> {
    if team.money < candidate.base_cost {
        return Err(RuleViolation::CannotAfford {
            cost: candidate.base_cost,
            money: team.money,
        });
    }

    let rank = candidate.rank();
    match rank {
        Some(Rank::Leader) if !team_must_buy_leader(team) => Err(RuleViolation::SecondLeader),
        Some(Rank::Elite) if !team_can_buy_elite(team) => Err(RuleViolation::TooManyElites),
        Some(Rank::Specialist) if !team_can_buy_specialist(team) => {
            Err(RuleViolation::TooManySpecialists)
        }
        Some(Rank::Freelancer) if !team_can_buy_freelancer(team) => {
            Err(RuleViolation::TooManyFreelancers)
        }
        _ if team_must_buy_leader(team) && rank != Some(Rank::Leader) => {
            Err(RuleViolation::LeaderRequired)
        }
        _ => Ok(()),
    }
}

/// Check that `unit` can equip `item` on top of what it already holds.
pub fn check_equip(unit: &Unit, item: &InventoryItem) -> Result<(), RuleViolation> {
    let others = || {
        unit.inventory
            .iter()
            .filter(|held| held.equipped && held.id != item.id)
    };

    if item.is_body_armor() && others().any(|held| held.is_body_armor()) {
        return Err(RuleViolation::AlreadyWearingArmor);
    }

    let already_held: i32 = unit
        .inventory
        .iter()
        .filter(|held| held.equipped && held.id == item.id)
        .map(|held| held.hands_required)
        .sum();
    let hands_in_use = unit.hands_in_use() - already_held;
    let hands_needed = hands_in_use + item.hands_required;

    let altered = ALTERED_SPECIES.contains(&unit.species.as_str());
    let has_any = |names: &[&str]| altered && names.iter().any(|name| unit.has_skill(name));

    let cannot_hold = has_any(&HOLD_NOTHING_SKILLS);
    let single_item = has_any(&SINGLE_ITEM_SKILLS);
    let third_hand =
        has_any(&THIRD_HAND_SKILLS) && (item.hands_required == 2 || hands_in_use == 2);

    if cannot_hold {
        Err(RuleViolation::CannotHoldItems)
    } else if hands_needed >= 2 && single_item {
        Err(RuleViolation::SingleOneHandedItem)
    } else if hands_needed > 3 || (hands_needed == 3 && !third_hand) {
        Err(RuleViolation::NotEnoughHands)
    } else {
        Ok(())
    }
}
