//! Matrix-multiply backends for the G·D step of the transition matrix.
//!
//! The engine only needs one dense product per run, so the product is
//! abstracted behind [`MatMulBackend`] and the implementation is chosen from
//! configuration:
//! - [`CpuBackend`] (reference, nalgebra)
//! - `CandleBackend` (candle tensors, CUDA when built with `cuda`)

use nalgebra::DMatrix;
use snprank_common::{Result, SnpRankError};
use snprank_config::BackendKind;

/// Dense matrix product provider.
pub trait MatMulBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Compute `lhs · rhs`.
    fn multiply(&self, lhs: &DMatrix<f64>, rhs: &DMatrix<f64>) -> Result<DMatrix<f64>>;
}

/// Build the backend selected in configuration.
pub fn select(kind: BackendKind) -> Result<Box<dyn MatMulBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(CpuBackend)),
        #[cfg(feature = "gpu")]
        BackendKind::Accelerated => Ok(Box::new(CandleBackend::new())),
        #[cfg(not(feature = "gpu"))]
        BackendKind::Accelerated => Err(SnpRankError::Backend(
            "accelerated backend requested but snprank was built without the `gpu` feature"
                .to_string(),
        )),
    }
}

fn check_inner_dims(lhs: &DMatrix<f64>, rhs: &DMatrix<f64>) -> Result<()> {
    if lhs.ncols() != rhs.nrows() {
        return Err(SnpRankError::InvalidInput(format!(
            "cannot multiply {}x{} by {}x{}",
            lhs.nrows(),
            lhs.ncols(),
            rhs.nrows(),
            rhs.ncols()
        )));
    }
    Ok(())
}

// ── CPU reference ───────────────────────────────────────────────────────────

/// Reference implementation using nalgebra's dense product.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackend;

impl MatMulBackend for CpuBackend {
    fn name(&self) -> &'static str {
        "cpu"
    }

    fn multiply(&self, lhs: &DMatrix<f64>, rhs: &DMatrix<f64>) -> Result<DMatrix<f64>> {
        check_inner_dims(lhs, rhs)?;
        Ok(lhs * rhs)
    }
}

// ── Candle ──────────────────────────────────────────────────────────────────

#[cfg(feature = "gpu")]
pub use self::candle::CandleBackend;

#[cfg(feature = "gpu")]
mod candle {
    use candle_core::{Device, Tensor};
    use nalgebra::DMatrix;
    use snprank_common::{Result, SnpRankError};
    use tracing::{debug, info};

    use super::{check_inner_dims, MatMulBackend};

    /// Candle-based product. Runs on CUDA device 0 when available, CPU otherwise.
    #[derive(Debug, Clone)]
    pub struct CandleBackend {
        device: Device,
    }

    impl CandleBackend {
        pub fn new() -> Self {
            Self {
                device: Self::select_device(),
            }
        }

        pub fn with_device(device: Device) -> Self {
            Self { device }
        }

        pub fn device(&self) -> &Device {
            &self.device
        }

        fn select_device() -> Device {
            #[cfg(feature = "cuda")]
            {
                match Device::new_cuda(0) {
                    Ok(device) => {
                        info!("CUDA device available");
                        return device;
                    }
                    Err(e) => {
                        debug!("CUDA not available: {}, falling back to CPU", e);
                    }
                }
            }

            info!("Accelerated backend running on CPU device");
            Device::Cpu
        }

        /// Copy a column-major nalgebra matrix into a row-major tensor.
        fn to_tensor(&self, m: &DMatrix<f64>) -> Result<Tensor> {
            let row_major: Vec<f64> = m.transpose().iter().copied().collect();
            Tensor::from_vec(row_major, (m.nrows(), m.ncols()), &self.device).map_err(backend_err)
        }
    }

    impl Default for CandleBackend {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MatMulBackend for CandleBackend {
        fn name(&self) -> &'static str {
            if self.device.is_cuda() {
                "candle-cuda"
            } else {
                "candle-cpu"
            }
        }

        fn multiply(&self, lhs: &DMatrix<f64>, rhs: &DMatrix<f64>) -> Result<DMatrix<f64>> {
            check_inner_dims(lhs, rhs)?;
            let a = self.to_tensor(lhs)?;
            let b = self.to_tensor(rhs)?;
            let product = a.matmul(&b).map_err(backend_err)?;
            let flat = product
                .flatten_all()
                .and_then(|t| t.to_vec1::<f64>())
                .map_err(backend_err)?;
            debug!("candle product {}x{} computed", lhs.nrows(), rhs.ncols());
            Ok(DMatrix::from_row_slice(lhs.nrows(), rhs.ncols(), &flat))
        }
    }

    fn backend_err(e: candle_core::Error) -> SnpRankError {
        SnpRankError::Backend(e.to_string())
    }
}
