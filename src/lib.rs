// Copyright (c) The hanoi-variants contributors, 2026, licensed under the EUPL-1.2-or-later.

//! hanoi-variants: a library implementing the rules of the Tower of Hanoi and two of its variants.
//!
//! A tower consists of three pegs and a stack of disks which starts on the first peg. Disks are
//! moved one at a time from the top of one peg to the top of another, and a disk may never rest on
//! a smaller one. The puzzle is solved once every disk sits on the last peg in its original order.
//! Besides the classic rules, two variants are supported: the _triple_ variant, with three disks
//! of every size, and the _special_ variant, which adds a single wildcard disk that may be placed
//! on anything but only accepts disks up to a fixed threshold on top of itself. In this library,
//! we implement the movement rules, goal detection and an optimal solver; the gameplay loop is left
//! to the user.

#![no_std]

use alloc::vec::Vec;
use core::error::Error;
use core::fmt::{Debug, Display, Formatter};
use core::iter::repeat_n;
use num_traits::{One, Unsigned, Zero};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

extern crate alloc;

/// The number of pegs in every tower.
pub const PEGS: usize = 3;

/// Copies of each disk size in the triple variant.
const TRIPLE: usize = 3;

/// Marker trait: specifies that a value may be used for disk sizes.
pub trait DiskValue:
    One
    + Zero
    + Unsigned
    + Ord
    + Copy
    + Into<usize>
    + Debug
    + Display
    + DeserializeOwned
    + Serialize
    + 'static
{
}

impl<V> DiskValue for V where
    V: One
        + Zero
        + Unsigned
        + Ord
        + Copy
        + Into<usize>
        + Debug
        + Display
        + DeserializeOwned
        + Serialize
        + 'static
{
}

/// A disk, generic over the numeric type which backs its size. Larger values are larger disks.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Disk<V> {
    /// An ordinary disk of the provided size.
    Sized(V),
    /// The wildcard disk of the special variant. It has no size of its own.
    Wildcard,
}

impl<V> Disk<V> {
    /// The size of the disk, or [`None`] for the wildcard.
    pub fn size(&self) -> Option<&V> {
        match self {
            Disk::Sized(size) => Some(size),
            Disk::Wildcard => None,
        }
    }

    /// Whether this is the wildcard disk.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Disk::Wildcard)
    }
}

impl<V> Display for Disk<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Disk::Sized(size) => write!(f, "{size}"),
            Disk::Wildcard => f.write_str("_"),
        }
    }
}

/// The rule set a tower is played under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Variant<V> {
    /// One disk of each size; a disk may rest on an equal or larger one.
    Classic,
    /// Three disks of each size, with the same placement rule as [`Variant::Classic`].
    Triple,
    /// One disk of each size plus a wildcard disk. The wildcard may be placed on any disk, but only
    /// disks no larger than `threshold` may be placed on the wildcard.
    Special {
        /// The largest disk size which may rest on the wildcard.
        threshold: V,
    },
}

impl<V> Display for Variant<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Variant::Classic => f.write_str("classic"),
            Variant::Triple => f.write_str("triple"),
            Variant::Special { threshold } => write!(f, "special (threshold {threshold})"),
        }
    }
}

impl<V> Variant<V>
where
    V: DiskValue,
{
    fn validate(&self, disks: V) -> Result<(), ConstructionError<V>> {
        match *self {
            _ if disks.is_zero() => Err(ConstructionError::NoDisks),
            Variant::Special { threshold } if threshold > disks => {
                Err(ConstructionError::ThresholdOutOfRange { threshold, disks })
            }
            _ => Ok(()),
        }
    }

    /// Whether `disk` may be placed directly on top of `onto` under this rule set.
    fn admits(&self, disk: &Disk<V>, onto: &Disk<V>) -> Result<(), InvalidMoveType<V>> {
        match (self, disk, onto) {
            (Variant::Special { .. }, Disk::Wildcard, _) => Ok(()),
            (Variant::Special { threshold }, Disk::Sized(size), Disk::Wildcard) => {
                if size <= threshold {
                    Ok(())
                } else {
                    Err(InvalidMoveType::OverThreshold {
                        disk: *size,
                        threshold: *threshold,
                    })
                }
            }
            (_, Disk::Sized(size), Disk::Sized(below)) => {
                if size <= below {
                    Ok(())
                } else {
                    Err(InvalidMoveType::Oversized {
                        disk: *size,
                        onto: *below,
                    })
                }
            }
            (Variant::Classic | Variant::Triple, _, _) => Err(InvalidMoveType::UnexpectedWildcard),
        }
    }
}

/// An error which denotes that a peg holds no disks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EmptyPegError;

impl Display for EmptyPegError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("the peg holds no disks")
    }
}

impl Error for EmptyPegError {}

/// A single peg: a stack of disks, stored bottom to top.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Peg<V> {
    disks: Vec<Disk<V>>,
}

impl<V> Peg<V> {
    fn new() -> Self {
        Self { disks: Vec::new() }
    }

    /// The disks on this peg, from the bottom of the peg to the top.
    pub fn disks(&self) -> &[Disk<V>] {
        &self.disks
    }

    /// The number of disks on this peg.
    pub fn len(&self) -> usize {
        self.disks.len()
    }

    /// Whether this peg holds no disks.
    pub fn is_empty(&self) -> bool {
        self.disks.is_empty()
    }

    /// The disk on top of this peg.
    pub fn top(&self) -> Result<&Disk<V>, EmptyPegError> {
        self.disks.last().ok_or(EmptyPegError)
    }

    fn push(&mut self, disk: Disk<V>) {
        self.disks.push(disk);
    }

    fn pop(&mut self) -> Result<Disk<V>, EmptyPegError> {
        self.disks.pop().ok_or(EmptyPegError)
    }
}

impl<V> Display for Peg<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("[")?;
        for (pos, disk) in self.disks.iter().enumerate() {
            if pos > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{disk}")?;
        }
        f.write_str("]")
    }
}

/// A move of the top disk of one peg onto another peg.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Move {
    source: usize,
    destination: usize,
}

impl Move {
    /// Create a new move from the `source` peg to the `destination` peg.
    pub fn new(source: usize, destination: usize) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// The index of the peg the disk is taken from.
    pub fn source(&self) -> usize {
        self.source
    }

    /// The index of the peg the disk is placed on.
    pub fn destination(&self) -> usize {
        self.destination
    }
}

impl From<(usize, usize)> for Move {
    fn from((source, destination): (usize, usize)) -> Self {
        Self::new(source, destination)
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// An error associated with configuring the disks of a tower.
#[derive(Debug)]
pub enum ConstructionError<V> {
    /// A tower needs at least one disk.
    NoDisks,
    /// The wildcard threshold exceeded the number of disks.
    ThresholdOutOfRange {
        /// The requested threshold.
        threshold: V,
        /// The requested number of disks.
        disks: V,
    },
}

impl<V> Display for ConstructionError<V>
where
    V: DiskValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ConstructionError::NoDisks => f.write_str("a tower requires at least one disk"),
            ConstructionError::ThresholdOutOfRange { threshold, disks } => f.write_fmt(
                format_args!("wildcard threshold {threshold} is larger than the {disks} disks"),
            ),
        }
    }
}

impl<V> Error for ConstructionError<V> where V: DiskValue {}

/// An error which denotes that a tower has not yet been given any disks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UninitializedError;

impl Display for UninitializedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str("the number of disks has not been set")
    }
}

impl Error for UninitializedError {}

/// The type of invalid move that was observed in an [`InvalidMoveError`].
#[derive(Debug)]
pub enum InvalidMoveType<V> {
    /// One of the pegs doesn't exist.
    OutOfRange,
    /// The source and destination are the same peg.
    SamePeg,
    /// There is no disk on the source peg.
    EmptySource,
    /// The moved disk is larger than the disk it would be placed on.
    Oversized {
        /// The size of the moved disk.
        disk: V,
        /// The size of the disk on top of the destination.
        onto: V,
    },
    /// The moved disk is larger than the threshold of the wildcard it would be placed on.
    OverThreshold {
        /// The size of the moved disk.
        disk: V,
        /// The wildcard threshold.
        threshold: V,
    },
    /// A wildcard was encountered in a tower whose variant has none.
    UnexpectedWildcard,
}

/// An error which describes an attempted invalid move. The tower is left unchanged.
#[derive(Debug)]
pub struct InvalidMoveError<V> {
    source: usize,
    destination: usize,
    kind: InvalidMoveType<V>,
}

impl<V> InvalidMoveError<V> {
    /// The requested source peg.
    pub fn source(&self) -> usize {
        self.source
    }

    /// The requested destination peg.
    pub fn destination(&self) -> usize {
        self.destination
    }

    /// The rule which the move violated.
    pub fn kind(&self) -> &InvalidMoveType<V> {
        &self.kind
    }
}

impl<V> Display for InvalidMoveError<V>
where
    V: DiskValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let (src, dst) = (self.source, self.destination);
        match &self.kind {
            InvalidMoveType::OutOfRange => f.write_fmt(format_args!("cannot move from peg {src} to peg {dst} because only pegs 0 to {} exist", PEGS - 1)),
            InvalidMoveType::SamePeg => f.write_fmt(format_args!("cannot move from peg {src} to peg {dst} because they are the same peg")),
            InvalidMoveType::EmptySource => f.write_fmt(format_args!("cannot move from peg {src} to peg {dst} because peg {src} is empty")),
            InvalidMoveType::Oversized { disk, onto } => f.write_fmt(format_args!("cannot move from peg {src} to peg {dst} because disk {disk} is larger than disk {onto}")),
            InvalidMoveType::OverThreshold { disk, threshold } => f.write_fmt(format_args!("cannot move from peg {src} to peg {dst} because disk {disk} is larger than the wildcard threshold {threshold}")),
            InvalidMoveType::UnexpectedWildcard => f.write_fmt(format_args!("cannot move from peg {src} to peg {dst} because this variant has no wildcard")),
        }
    }
}

impl<V> Error for InvalidMoveError<V> where V: DiskValue {}

/// An error which denotes that the solver cannot be run on a tower.
#[derive(Debug)]
pub enum SolveError<V> {
    /// The tower has not yet been given any disks.
    Uninitialized,
    /// The solver does not support the variant of the tower.
    Unsupported(Variant<V>),
}

impl<V> Display for SolveError<V>
where
    V: DiskValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SolveError::Uninitialized => f.write_fmt(format_args!("cannot solve: {UninitializedError}")),
            SolveError::Unsupported(variant) => {
                f.write_fmt(format_args!("cannot solve the {variant} variant"))
            }
        }
    }
}

impl<V> Error for SolveError<V> where V: DiskValue {}

/// The minimum number of moves needed to relocate a stack of `height` disks, or [`None`] if the
/// count doesn't fit in a [`u128`].
pub fn optimal_move_count(height: usize) -> Option<u128> {
    let height = u32::try_from(height).ok()?;
    1u128.checked_shl(height).map(|count| count - 1)
}

/// An error which denotes that a deserialized tower does not hold a valid arrangement.
#[derive(Debug)]
pub enum InvalidStateError<V> {
    /// The recorded disk count or threshold could not have been used to construct the tower.
    Construction(ConstructionError<V>),
    /// The tower holds disks other than those of its initial configuration.
    WrongDisks,
    /// A disk on the provided peg rests on a disk which may not carry it.
    Misplaced {
        /// The index of the offending peg.
        peg: usize,
        /// The placement rule which the disk violates.
        reason: InvalidMoveType<V>,
    },
}

impl<V> Display for InvalidStateError<V>
where
    V: DiskValue,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidStateError::Construction(err) => f.write_fmt(format_args!("invalid tower: {err}")),
            InvalidStateError::WrongDisks => f.write_str("invalid tower: the disks do not match its variant and disk count"),
            InvalidStateError::Misplaced { peg, reason } => match reason {
                InvalidMoveType::Oversized { disk, onto } => f.write_fmt(format_args!("invalid tower: disk {disk} rests on disk {onto} on peg {peg}")),
                InvalidMoveType::OverThreshold { disk, threshold } => f.write_fmt(format_args!("invalid tower: disk {disk} rests on the wildcard on peg {peg}, above the threshold {threshold}")),
                _ => f.write_fmt(format_args!("invalid tower: peg {peg} holds a wildcard this variant has none of")),
            },
        }
    }
}

impl<V> Error for InvalidStateError<V> where V: DiskValue {}

/// A tower of three pegs. This is guaranteed to hold a valid arrangement as long as it is
/// constructed with [`Tower::new`] (or [`Tower::empty`] and [`Tower::set_disks`]) and manipulated
/// via [`Tower::try_move`] and its relatives. Deserialized towers are checked against the same
/// rules and rejected with an [`InvalidStateError`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(
    try_from = "UncheckedTower<V>",
    bound(deserialize = "V: DiskValue")
)]
pub struct Tower<V> {
    variant: Variant<V>,
    disks: Option<V>,
    pegs: [Peg<V>; PEGS],
}

impl<V> Tower<V> {
    /// Produce a tower without any disks for the provided variant. Disks are added with
    /// [`Tower::set_disks`]; until then no move is possible and [`Tower::reset`] fails.
    pub fn empty(variant: Variant<V>) -> Self {
        Self {
            variant,
            disks: None,
            pegs: core::array::from_fn(|_| Peg::new()),
        }
    }

    /// The rule set of this tower.
    pub fn variant(&self) -> &Variant<V> {
        &self.variant
    }

    /// The number of distinct disk sizes, if set.
    pub fn disks(&self) -> Option<&V> {
        self.disks.as_ref()
    }

    /// The peg with the provided index, if it exists.
    pub fn peg(&self, idx: usize) -> Option<&Peg<V>> {
        self.pegs.get(idx)
    }

    /// All pegs of the tower.
    pub fn pegs(&self) -> &[Peg<V>; PEGS] {
        &self.pegs
    }
}

impl<V> Tower<V>
where
    V: DiskValue,
{
    /// Create a tower of the provided variant with `disks` distinct disk sizes, laid out in its
    /// initial configuration.
    pub fn new(variant: Variant<V>, disks: V) -> Result<Self, ConstructionError<V>> {
        let mut tower = Self::empty(variant);
        tower.set_disks(disks)?;
        Ok(tower)
    }

    /// Create a classic tower with `disks` disks.
    pub fn classic(disks: V) -> Result<Self, ConstructionError<V>> {
        Self::new(Variant::Classic, disks)
    }

    /// Create a triple tower with three disks for each of `disks` sizes.
    pub fn triple(disks: V) -> Result<Self, ConstructionError<V>> {
        Self::new(Variant::Triple, disks)
    }

    /// Create a special tower with `disks` disks and a wildcard accepting disks up to `threshold`.
    pub fn special(disks: V, threshold: V) -> Result<Self, ConstructionError<V>> {
        Self::new(Variant::Special { threshold }, disks)
    }

    /// Set the number of distinct disk sizes and lay the tower out in its initial configuration.
    /// On error, the tower is left untouched.
    pub fn set_disks(&mut self, disks: V) -> Result<(), ConstructionError<V>> {
        if let Err(err) = self.variant.validate(disks) {
            log::warn!("{err}");
            return Err(err);
        }
        self.disks = Some(disks);
        self.lay_out(disks);
        Ok(())
    }

    fn lay_out(&mut self, disks: V) {
        let copies = match self.variant {
            Variant::Triple => TRIPLE,
            Variant::Classic | Variant::Special { .. } => 1,
        };
        let mut pegs: [Peg<V>; PEGS] = core::array::from_fn(|_| Peg::new());
        let mut size = disks;
        while !size.is_zero() {
            for _ in 0..copies {
                pegs[0].push(Disk::Sized(size));
            }
            size = size - V::one();
        }
        if let Variant::Special { .. } = self.variant {
            pegs[1].push(Disk::Wildcard);
        }
        self.pegs = pegs;
    }

    /// Return the tower to its initial configuration.
    pub fn reset(&mut self) -> Result<(), UninitializedError> {
        let Some(disks) = self.disks else {
            log::warn!("cannot reset: {UninitializedError}");
            return Err(UninitializedError);
        };
        self.lay_out(disks);
        Ok(())
    }

    /// A copy of the contents of each peg, each listed from the bottom of the peg to the top.
    pub fn state(&self) -> [Vec<Disk<V>>; PEGS] {
        self.pegs.each_ref().map(|peg| peg.disks.clone())
    }

    /// Check whether the top disk of `source` may be moved onto `destination`.
    pub fn check_move(&self, source: usize, destination: usize) -> Result<(), InvalidMoveError<V>> {
        let fail = |kind: InvalidMoveType<V>| -> Result<(), InvalidMoveError<V>> {
            Err(InvalidMoveError {
                source,
                destination,
                kind,
            })
        };
        if source >= PEGS || destination >= PEGS {
            return fail(InvalidMoveType::OutOfRange);
        }
        if source == destination {
            return fail(InvalidMoveType::SamePeg);
        }
        let Ok(disk) = self.pegs[source].top() else {
            return fail(InvalidMoveType::EmptySource);
        };
        match self.pegs[destination].top() {
            Ok(onto) => self.variant.admits(disk, onto).or_else(fail),
            Err(EmptyPegError) => Ok(()),
        }
    }

    /// Move the top disk of `source` onto `destination`, returning the moved disk.
    pub fn try_move(
        &mut self,
        source: usize,
        destination: usize,
    ) -> Result<Disk<V>, InvalidMoveError<V>> {
        self.check_move(source, destination)?;
        let disk = self.pegs[source]
            .pop()
            .map_err(|EmptyPegError| InvalidMoveError {
                source,
                destination,
                kind: InvalidMoveType::EmptySource,
            })?;
        self.pegs[destination].push(disk);
        log::debug!("moved disk {disk} from peg {source} to peg {destination}");
        Ok(disk)
    }

    /// Move the top disk of `source` onto `destination` if the rules allow it. Returns whether the
    /// move was made; the reason for a rejection is logged.
    pub fn apply_move(&mut self, source: usize, destination: usize) -> bool {
        match self.try_move(source, destination) {
            Ok(_) => true,
            Err(err) => {
                log::info!("{err}");
                false
            }
        }
    }

    /// Whether the tower is in its goal configuration: every disk on the last peg, largest at the
    /// bottom. The position of the wildcard is irrelevant.
    pub fn is_goal(&self) -> bool {
        let Some(disks) = self.disks else {
            return false;
        };
        let [first, second, last] = &self.pegs;
        match self.variant {
            Variant::Classic => {
                first.is_empty() && second.is_empty() && descends(last.disks.iter(), disks, 1)
            }
            Variant::Triple => {
                first.is_empty() && second.is_empty() && descends(last.disks.iter(), disks, TRIPLE)
            }
            Variant::Special { .. } => {
                let cleared =
                    |peg: &Peg<V>| matches!(peg.disks.as_slice(), [] | [Disk::Wildcard]);
                let wildcards = usize::from(last.disks.contains(&Disk::Wildcard));
                cleared(first)
                    && cleared(second)
                    && last.len() == Into::<usize>::into(disks) + wildcards
                    && descends(last.disks.iter().filter(|d| !d.is_wildcard()), disks, 1)
            }
        }
    }

    /// Solve the tower from its initial configuration, applying each move and returning the moves
    /// which were made.
    ///
    /// The classic variant is solved in the optimal `2^n - 1` moves. The triple variant is solved by
    /// treating all of its `3n` disks as distinct. Moves the rules reject are skipped, so a tower
    /// which is not in its initial configuration is left in whatever state the plan reaches.
    pub fn solve(&mut self) -> Result<Vec<Move>, SolveError<V>> {
        let disks: usize = self.disks.ok_or(SolveError::Uninitialized)?.into();
        let height = match self.variant {
            Variant::Classic => disks,
            Variant::Triple => disks * TRIPLE,
            special @ Variant::Special { .. } => return Err(SolveError::Unsupported(special)),
        };
        log::debug!("solving {} tower of height {height}", self.variant);
        let mut moves = Vec::new();
        self.relocate(height, 0, 1, PEGS - 1, &mut moves);
        Ok(moves)
    }

    fn relocate(
        &mut self,
        height: usize,
        source: usize,
        spare: usize,
        destination: usize,
        moves: &mut Vec<Move>,
    ) {
        if height == 0 {
            return;
        }
        self.relocate(height - 1, source, destination, spare, moves);
        match self.try_move(source, destination) {
            Ok(_) => moves.push(Move::new(source, destination)),
            Err(err) => log::debug!("solver skipped a move: {err}"),
        }
        self.relocate(height - 1, spare, source, destination, moves);
    }
}

/// Whether `disks` reads `top` down to 1, bottom to top, with `copies` disks of each size.
fn descends<'a, V>(disks: impl Iterator<Item = &'a Disk<V>>, top: V, copies: usize) -> bool
where
    V: DiskValue,
{
    let top: usize = top.into();
    let expected = (1..=top)
        .rev()
        .flat_map(|size| repeat_n(Some(size), copies));
    disks
        .map(|disk| disk.size().map(|size| Into::<usize>::into(*size)))
        .eq(expected)
}

/// The serialized form of a [`Tower`], before its arrangement is checked.
#[derive(Deserialize)]
struct UncheckedTower<V> {
    variant: Variant<V>,
    disks: Option<V>,
    pegs: [Peg<V>; PEGS],
}

impl<V> TryFrom<UncheckedTower<V>> for Tower<V>
where
    V: DiskValue,
{
    type Error = InvalidStateError<V>;

    fn try_from(unchecked: UncheckedTower<V>) -> Result<Self, Self::Error> {
        let mut initial = Self::empty(unchecked.variant);
        if let Some(disks) = unchecked.disks {
            initial
                .set_disks(disks)
                .map_err(InvalidStateError::Construction)?;
        }

        let sorted = |tower: &Self| {
            let mut disks = tower.state().concat();
            disks.sort_by_key(|disk| disk.size().copied());
            disks
        };
        let tower = Self {
            variant: initial.variant,
            disks: initial.disks,
            pegs: unchecked.pegs,
        };
        if sorted(&tower) != sorted(&initial) {
            return Err(InvalidStateError::WrongDisks);
        }

        for (peg, stack) in tower.pegs.iter().enumerate() {
            for pair in stack.disks.windows(2) {
                tower
                    .variant
                    .admits(&pair[1], &pair[0])
                    .map_err(|reason| InvalidStateError::Misplaced { peg, reason })?;
            }
        }
        Ok(tower)
    }
}

impl<V> Display for Tower<V>
where
    V: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for (idx, peg) in self.pegs.iter().enumerate() {
            writeln!(f, "Peg {idx}: {peg}")?;
        }
        Ok(())
    }
}
