//! Skeleton adjacency for drawing a detected hand.

/// Joint chains per finger, each starting at the wrist.  This is the
/// order the overlay walks when it draws bone lines.
pub const FINGER_CHAINS: [[usize; 5]; 5] = [
    [0, 1, 2, 3, 4],     // thumb
    [0, 5, 6, 7, 8],     // index
    [0, 9, 10, 11, 12],  // middle
    [0, 13, 14, 15, 16], // ring
    [0, 17, 18, 19, 20], // pinky
];

/// The 20 bone segments as `(from, to)` landmark index pairs, one
/// chain's four segments after another.
pub const HAND_BONES: [(usize, usize); 20] = [
    (0, 1), (1, 2), (2, 3), (3, 4),      // thumb
    (0, 5), (5, 6), (6, 7), (7, 8),      // index
    (0, 9), (9, 10), (10, 11), (11, 12), // middle
    (0, 13), (13, 14), (14, 15), (15, 16), // ring
    (0, 17), (17, 18), (18, 19), (19, 20), // pinky
];
