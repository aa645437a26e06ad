// ==========================================
// 机场运行状态引擎 - 航线网络
// ==========================================
// 职责: 维护无向机场网络，回答连通性与最少航段查询
// 红线: 边对称、无自环；邻接表保持插入顺序以保证遍历确定性
// ==========================================

use crate::domain::route::{Connectivity, GraphListing, RouteEdge};
use crate::domain::types::normalize_airport_code;
use crate::engine::error::{EngineError, EngineResult};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

// ==========================================
// RouteGraph - 航线网络
// ==========================================
// 机场代码驻留为稠密下标，adjacency[i] 为 i 的邻居（插入顺序）
#[derive(Debug, Clone, Default)]
pub struct RouteGraph {
    codes: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
    edges: HashSet<(usize, usize)>, // (小下标, 大下标)
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================
    // 写操作
    // ==========================================

    /// 新增机场（幂等）
    ///
    /// # 返回
    /// - `Ok(true)`: 新建节点
    /// - `Ok(false)`: 节点已存在
    pub fn add_airport(&mut self, code: &str) -> EngineResult<bool> {
        let code = Self::validated_code(code)?;
        if self.index.contains_key(&code) {
            return Ok(false);
        }
        self.intern(code);
        Ok(true)
    }

    /// 新增无向航线（幂等），缺失的机场自动创建
    ///
    /// # 返回
    /// - `Ok(true)`: 新建航线
    /// - `Ok(false)`: 航线已存在
    pub fn add_route(&mut self, from: &str, to: &str) -> EngineResult<bool> {
        let a = Self::validated_code(from)?;
        let b = Self::validated_code(to)?;
        if a == b {
            return Err(EngineError::ValidationError(format!(
                "航线必须连接两个不同机场: {}",
                a
            )));
        }

        let ia = self.intern(a);
        let ib = self.intern(b);
        let key = (ia.min(ib), ia.max(ib));
        if !self.edges.insert(key) {
            return Ok(false);
        }
        self.adjacency[ia].push(ib);
        self.adjacency[ib].push(ia);
        debug!(from = %self.codes[ia], to = %self.codes[ib], "航线已添加");
        Ok(true)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 列出机场（插入顺序）与去重后的航线（字典序小者在前）
    pub fn list_graph(&self) -> GraphListing {
        let mut routes = Vec::with_capacity(self.edges.len());
        for (i, neighbors) in self.adjacency.iter().enumerate() {
            for &j in neighbors {
                if self.codes[i] < self.codes[j] {
                    routes.push(RouteEdge::canonical(&self.codes[i], &self.codes[j]));
                }
            }
        }
        GraphListing {
            airports: self.codes.clone(),
            routes,
        }
    }

    /// 连通性查询（BFS）
    ///
    /// 任一机场不存在时返回不连通，不视为错误
    pub fn is_connected(&self, from: &str, to: &str) -> Connectivity {
        let start = self.index.get(&normalize_airport_code(from));
        let target = self.index.get(&normalize_airport_code(to));
        match (start, target) {
            (Some(&s), Some(&t)) => self.bfs_path(s, t),
            _ => Connectivity::disconnected(),
        }
    }

    /// 最少航段航线
    ///
    /// 无权图中 BFS 首次到达的路径即为最少航段路径
    pub fn shortest_route(&self, from: &str, to: &str) -> Connectivity {
        self.is_connected(from, to)
    }

    pub fn contains_airport(&self, code: &str) -> bool {
        self.index.contains_key(&normalize_airport_code(code))
    }

    /// 邻居机场（插入顺序）
    pub fn neighbors(&self, code: &str) -> Vec<&str> {
        self.index
            .get(&normalize_airport_code(code))
            .map(|&i| {
                self.adjacency[i]
                    .iter()
                    .map(|&j| self.codes[j].as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn airport_count(&self) -> usize {
        self.codes.len()
    }

    pub fn route_count(&self) -> usize {
        self.edges.len()
    }

    /// 检查对称性与无自环
    pub fn symmetry_violations(&self) -> Vec<String> {
        let mut violations = Vec::new();
        for (i, neighbors) in self.adjacency.iter().enumerate() {
            for &j in neighbors {
                if i == j {
                    violations.push(format!("自环: {}", self.codes[i]));
                } else if !self.adjacency[j].contains(&i) {
                    violations.push(format!(
                        "非对称航线: {} -> {}",
                        self.codes[i], self.codes[j]
                    ));
                }
            }
        }
        violations
    }

    // ==========================================
    // 内部方法
    // ==========================================

    fn validated_code(raw: &str) -> EngineResult<String> {
        let code = normalize_airport_code(raw);
        if code.is_empty() {
            return Err(EngineError::ValidationError("机场代码不能为空".to_string()));
        }
        Ok(code)
    }

    fn intern(&mut self, code: String) -> usize {
        if let Some(&i) = self.index.get(&code) {
            return i;
        }
        let i = self.codes.len();
        self.index.insert(code.clone(), i);
        self.codes.push(code);
        self.adjacency.push(Vec::new());
        i
    }

    fn bfs_path(&self, start: usize, target: usize) -> Connectivity {
        let mut parent: Vec<Option<usize>> = vec![None; self.codes.len()];
        let mut visited = vec![false; self.codes.len()];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;

        while let Some(u) = queue.pop_front() {
            if u == target {
                break;
            }
            for &v in &self.adjacency[u] {
                if !visited[v] {
                    visited[v] = true;
                    parent[v] = Some(u);
                    queue.push_back(v);
                }
            }
        }

        if !visited[target] {
            return Connectivity::disconnected();
        }

        let mut path = vec![self.codes[target].clone()];
        let mut cur = target;
        while let Some(p) = parent[cur] {
            path.push(self.codes[p].clone());
            cur = p;
        }
        path.reverse();
        Connectivity::via(path)
    }
}
