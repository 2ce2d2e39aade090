//! Closing phrases printed after a successful run

use rand::seq::IndexedRandom;

const PHRASES: &[&str] = &[
    "Now go build something awesome!",
    "May your builds be green and your bugs be few.",
    "Ship it!",
    "Happy hacking!",
    "It works on my machine, and now on yours.",
    "Time to npm start something new.",
    "Keep calm and console.log on.",
];

/// A random closing phrase
pub fn random_phrase() -> &'static str {
    PHRASES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("Happy coding!")
}
