// World entity placement
// Landmarks and coin pickups share one layout for both variants; the flat
// world simply ignores the z coordinate.
use super::{Landmark, Position};

pub static LANDMARKS: [Landmark; 5] = [
    Landmark { position: Position::new(20.0, 30.0, 30.0), name: "Fire Mountain", tag: "flame" },
    Landmark { position: Position::new(80.0, 40.0, 20.0), name: "Ice Peaks", tag: "snowflake" },
    Landmark { position: Position::new(50.0, 70.0, 40.0), name: "Dark Forest", tag: "trees" },
    Landmark { position: Position::new(30.0, 80.0, 60.0), name: "Temple of Light", tag: "sparkles" },
    Landmark { position: Position::new(70.0, 20.0, 80.0), name: "Sky Island", tag: "cloud" },
];

// (id, position)
pub static COIN_SPOTS: [(u32, Position); 7] = [
    (1, Position::new(35.0, 45.0, 45.0)),
    (2, Position::new(65.0, 55.0, 35.0)),
    (3, Position::new(45.0, 35.0, 55.0)),
    (4, Position::new(55.0, 65.0, 65.0)),
    (5, Position::new(40.0, 60.0, 40.0)),
    (6, Position::new(75.0, 50.0, 50.0)),
    (7, Position::new(25.0, 50.0, 45.0)),
];
