use crate::{math::matrix::Matrix, layers::dense::Layer};

/// First and second moment estimates for one layer.
#[derive(Debug, Clone)]
struct Moments {
    m_w: Matrix,
    v_w: Matrix,
    m_b: Matrix,
    v_b: Matrix,
}

impl Moments {
    fn for_layer(layer: &Layer) -> Moments {
        let (wr, wc) = (layer.weights.rows, layer.weights.cols);
        let (br, bc) = (layer.biases.rows, layer.biases.cols);
        Moments {
            m_w: Matrix::zeros(wr, wc),
            v_w: Matrix::zeros(wr, wc),
            m_b: Matrix::zeros(br, bc),
            v_b: Matrix::zeros(br, bc),
        }
    }
}

/// Adam (Kingma & Ba) with bias-corrected step size:
///
///   m  = β1·m + (1-β1)·g
///   v  = β2·v + (1-β2)·g²
///   lr_t = lr · sqrt(1-β2^t) / (1-β1^t)
///   θ  = θ - lr_t · m / (sqrt(v) + ε)
#[derive(Debug, Clone)]
pub struct Adam {
    pub learning_rate: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub epsilon: f64,
    t: u64,
    moments: Vec<Moments>,
}

impl Adam {
    pub fn new(learning_rate: f64, beta1: f64, beta2: f64, epsilon: f64) -> Adam {
        Adam { learning_rate, beta1, beta2, epsilon, t: 0, moments: Vec::new() }
    }

    /// Number of updates applied so far.
    pub fn iterations(&self) -> u64 {
        self.t
    }

    /// Applies one update to every layer. `grads[i]` is (weights_grad, biases_grad)
    /// for `layers[i]`; moment buffers are allocated on the first call.
    pub fn step(&mut self, layers: &mut [Layer], grads: Vec<(Matrix, Matrix)>) {
        assert_eq!(layers.len(), grads.len(), "one gradient pair per layer");
        if self.moments.len() != layers.len() {
            self.moments = layers.iter().map(Moments::for_layer).collect();
        }

        self.t += 1;
        let t = self.t as i32;
        let lr_t = self.learning_rate * (1.0 - self.beta2.powi(t)).sqrt() / (1.0 - self.beta1.powi(t));

        for ((layer, (w_grad, b_grad)), moments) in
            layers.iter_mut().zip(grads).zip(self.moments.iter_mut())
        {
            layer.weights = update(
                &layer.weights, &w_grad, &mut moments.m_w, &mut moments.v_w,
                self.beta1, self.beta2, self.epsilon, lr_t,
            );
            layer.biases = update(
                &layer.biases, &b_grad, &mut moments.m_b, &mut moments.v_b,
                self.beta1, self.beta2, self.epsilon, lr_t,
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn update(
    param: &Matrix,
    grad: &Matrix,
    m: &mut Matrix,
    v: &mut Matrix,
    beta1: f64,
    beta2: f64,
    epsilon: f64,
    lr_t: f64,
) -> Matrix {
    *m = m.zip_map(grad, |m, g| beta1 * m + (1.0 - beta1) * g);
    *v = v.zip_map(grad, |v, g| beta2 * v + (1.0 - beta2) * g * g);
    let step = m.zip_map(v, |m, v| lr_t * m / (v.sqrt() + epsilon));
    param.zip_map(&step, |p, s| p - s)
}
