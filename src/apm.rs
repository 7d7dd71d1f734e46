use std::iter::repeat;

use crate::logistic::{stretch, squash};

// Adaptive Probability Map

/// An APM takes an existing prediction and a context, and interpolates
/// a new, refined prediction. The input probability is stretched and
/// quantized onto 33 bins with smaller bins near 0 and 1; the output is
/// interpolated between the two nearest bins. After each prediction the
/// entries on both sides of the previous query are adjusted toward the
/// observed bit, at a learning rate set by the caller.
pub struct Apm {
    bin:       usize,    // Last queried bin, updated next call
    num_cxts:  usize,    // Number of possible contexts
    bins:      Vec<u16>, // 33 bins per context, stretched-domain scale
}
impl Apm {
    /// Create a new Apm with n contexts, initialized to the identity
    /// mapping.
    pub fn new(n: usize) -> Apm {
        Apm {
            bin:       0,
            num_cxts:  n,
            bins:      repeat(
                       (0..33).map(|i| (squash((i - 16) * 128) * 16) as u16)
                       .collect::<Vec<u16>>().into_iter() )
                       .take(n)
                       .flatten()
                       .collect::<Vec<u16>>(),
        }
    }

    /// Refine prediction pr in context cxt, training the previous query
    /// with bit. rate controls adaptation speed (smaller = faster).
    pub fn p(&mut self, bit: i32, rate: i32, mut pr: i32, cxt: u32) -> i32 {
        assert!(bit == 0 || bit == 1);
        assert!(pr >= 0 && pr < 4096);
        assert!((cxt as usize) < self.num_cxts);
        self.update(bit, rate);

        pr = stretch(pr);   // -2047 to 2047
        let i_w = pr & 127; // Interpolation weight (33 points)

        self.bin = (((pr + 2048) >> 7) + (cxt as i32) * 33) as usize;

        let l = self.bins[self.bin] as i32;
        let u = self.bins[self.bin + 1] as i32;
        (l * (128 - i_w) + u * i_w) >> 11
    }

    fn update(&mut self, bit: i32, rate: i32) {
        assert!(rate > 0 && rate < 32);

        let g: i32 = (bit << 16) + (bit << rate) - bit - bit;

        let l = self.bins[self.bin] as i32;
        let u = self.bins[self.bin + 1] as i32;
        self.bins[self.bin]     = (l + ((g - l) >> rate)) as u16;
        self.bins[self.bin + 1] = (u + ((g - u) >> rate)) as u16;
    }
}
