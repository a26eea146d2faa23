//! # jdb_ckp_server - Background checkpoint scheduler
//! 后台检查点调度器
//!
//! One dedicated thread per connection takes checkpoints when either
//! trigger fires, so recovery replays a bounded amount of WAL.
//! 每个连接一个专用线程，任一触发条件满足时执行检查点，使恢复只需回放有限的 WAL。
//!
//! | Key                   | Trigger                           |
//! |-----------------------|-----------------------------------|
//! | `checkpoint.wait`     | Time interval, 0 disables         |
//! | `checkpoint.log_size` | WAL bytes since last, 0 disables  |
//! | `checkpoint.name`     | Checkpoint name override          |
//! | `in_memory`           | Rejects any trigger               |

#![cfg_attr(docsrs, feature(doc_cfg))]

// Internal modules / 内部模块
pub mod conf;
mod cond;
pub mod conn;
pub mod error;
pub mod gate;
pub mod name;
mod run;
pub mod server;

pub use conf::{Conf, Policy};
pub use conn::{Conn, Session};
pub use error::{BoxErr, Error, Result};
pub use gate::Gate;
pub use name::DEFAULT_NAME;
pub use server::Server;
