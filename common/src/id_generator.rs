use rand::Rng;

const ADJECTIVES: &[&str] = &[
    "Odd", "Even", "Lucky", "Nimble", "Patient", "Sneaky", "Careful", "Daring",
    "Quiet", "Sharp", "Steady", "Tricky", "Eager", "Calm", "Curious", "Plucky",
];

const NOUNS: &[&str] = &[
    "Walker", "Counter", "Stepper", "Runner", "Hopper", "Strider", "Ranger", "Rover",
    "Owl", "Otter", "Badger", "Heron", "Marten", "Gecko", "Wren", "Lemur",
];

/// Produces a display nickname for `PlayerReady` when the user has not set one.
pub fn generate_nickname() -> String {
    let mut rng = rand::rng();
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    format!("{} {}", adjective, noun)
}
