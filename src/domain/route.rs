// ==========================================
// 机场运行状态引擎 - 航线网络领域模型
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RouteEdge - 无向航线（规范方向: 字典序小的代码在前）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteEdge {
    pub from: String,
    pub to: String,
}

impl RouteEdge {
    /// 按规范方向构造
    pub fn canonical(a: &str, b: &str) -> Self {
        if a <= b {
            Self {
                from: a.to_string(),
                to: b.to_string(),
            }
        } else {
            Self {
                from: b.to_string(),
                to: a.to_string(),
            }
        }
    }
}

// ==========================================
// GraphListing - listGraph 输出
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphListing {
    pub airports: Vec<String>, // 按登记顺序
    pub routes: Vec<RouteEdge>,
}

// ==========================================
// Connectivity - 连通性/最短航线查询结果
// ==========================================
// 不连通时 path 为空
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connectivity {
    pub connected: bool,
    pub path: Vec<String>,
}

impl Connectivity {
    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn via(path: Vec<String>) -> Self {
        Self {
            connected: true,
            path,
        }
    }

    /// 航段数（path 节点数 - 1）
    pub fn hops(&self) -> Option<usize> {
        if self.connected {
            Some(self.path.len().saturating_sub(1))
        } else {
            None
        }
    }
}
