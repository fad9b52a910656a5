//! Animation curves
//!
//! The controller only needs to evaluate a curve over the progress domain
//! `[0, 1]`, so the capability is expressed by the [`Curve`] trait. The
//! concrete [`AnimationCurve`] is a keyframe curve with cubic Hermite
//! segments, stored in presets and authored in RON files.

use serde::{Deserialize, Serialize};

/// Anything that maps a progress value to a scalar
pub trait Curve {
    /// Evaluate the curve at `t`
    ///
    /// Implementations must be total over `[0, 1]`.
    fn evaluate(&self, t: f32) -> f32;
}

/// A single key on an [`AnimationCurve`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Position of the key on the curve's domain
    pub time: f32,
    /// Curve value at `time`
    pub value: f32,
    /// Slope arriving at this key
    #[serde(default)]
    pub in_tangent: f32,
    /// Slope leaving this key
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Create a key with flat tangents
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }

    /// Create a key with explicit tangents
    pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }
}

/// Keyframe curve with clamped ends
///
/// Keys are kept sorted by time. Outside the key range the curve holds the
/// first or last value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct AnimationCurve {
    keys: Vec<Keyframe>,
}

impl AnimationCurve {
    /// Build a curve from keys in any order
    pub fn new(mut keys: Vec<Keyframe>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Straight line from `(t0, v0)` to `(t1, v1)`
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        let slope = if t1 != t0 { (v1 - v0) / (t1 - t0) } else { 0.0 };
        Self::new(vec![
            Keyframe::with_tangents(t0, v0, slope, slope),
            Keyframe::with_tangents(t1, v1, slope, slope),
        ])
    }

    /// Flat curve at `value`
    pub fn constant(value: f32) -> Self {
        Self::linear(0.0, value, 1.0, value)
    }

    /// Smooth step from `(t0, v0)` to `(t1, v1)` with zero tangents
    pub fn ease_in_out(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self::new(vec![Keyframe::new(t0, v0), Keyframe::new(t1, v1)])
    }

    /// Insert a key, keeping the keys sorted
    pub fn add_key(&mut self, key: Keyframe) {
        let index = self.keys.partition_point(|k| k.time <= key.time);
        self.keys.insert(index, key);
    }

    /// The keys of this curve, sorted by time
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if the curve has no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Curve for AnimationCurve {
    fn evaluate(&self, t: f32) -> f32 {
        let keys = self.keys.as_slice();
        let (first, last) = match (keys.first(), keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };

        if t.is_nan() || t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // first.time < t < last.time, so 1 <= index < len
        let index = keys.partition_point(|k| k.time <= t);
        let a = &keys[index - 1];
        let b = &keys[index];

        let dt = b.time - a.time;
        if dt <= 0.0 {
            return b.value;
        }

        let s = (t - a.time) / dt;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * a.value + h10 * dt * a.out_tangent + h01 * b.value + h11 * dt * b.in_tangent
    }
}

impl<C: Curve + ?Sized> Curve for &C {
    fn evaluate(&self, t: f32) -> f32 {
        (**self).evaluate(t)
    }
}

impl From<Vec<Keyframe>> for AnimationCurve {
    fn from(keys: Vec<Keyframe>) -> Self {
        AnimationCurve::new(keys)
    }
}

impl From<AnimationCurve> for Vec<Keyframe> {
    fn from(curve: AnimationCurve) -> Self {
        curve.keys
    }
}
