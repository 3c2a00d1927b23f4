// 数据库查询
// 从统计数据库读取领袖队伍成员的属性行 (leader, type1)

use std::path::Path;
use std::time::{Duration, Instant};
use log::{debug, info};
use rusqlite::{Connection, OpenFlags};
use crate::core::error::{DashboardError, Result};
use crate::pokemon::LeaderTypeRow;

// 结果集必须包含 leader 与 type1 两列
pub const DEFAULT_LEADER_TYPES_SQL: &str = "\
SELECT g.leader AS leader, p.type1 AS type1
FROM gym g
JOIN gym_pokemon gp ON gp.gym_id = g.gym_id
JOIN pokemon p ON p.name = gp.pokemon
ORDER BY g.gym_id, gp.rowid";

// 数据库统计
#[derive(Debug, Clone, Default)]
pub struct DatabaseStatistics {
    pub queries_executed: u64,
    pub rows_read: u64,
    pub total_query_time: Duration,
}

pub struct StatsDatabase {
    connection: Connection,
    statistics: DatabaseStatistics,
}

impl StatsDatabase {
    // 只读打开，仪表盘从不写库
    pub fn open(db_path: &Path) -> Result<Self> {
        let connection = Connection::open_with_flags(db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|e| DashboardError::Database(format!("打开数据库失败 {}: {}", db_path.display(), e)))?;

        info!("数据库已打开: {}", db_path.display());
        Ok(Self::from_connection(connection))
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self {
            connection,
            statistics: DatabaseStatistics::default(),
        }
    }

    pub fn statistics(&self) -> &DatabaseStatistics {
        &self.statistics
    }

    pub fn load_leader_types_from_file(&mut self, sql_path: &Path) -> Result<Vec<LeaderTypeRow>> {
        let query = std::fs::read_to_string(sql_path).map_err(|e| {
            DashboardError::FileError(format!("读取SQL文件失败 {}: {}", sql_path.display(), e))
        })?;
        self.load_leader_types(&query)
    }

    pub fn load_leader_types(&mut self, query: &str) -> Result<Vec<LeaderTypeRow>> {
        let start_time = Instant::now();

        let mut stmt = self.connection.prepare(query.trim().trim_end_matches(';'))
            .map_err(|e| DashboardError::Database(format!("准备查询失败: {}", e)))?;

        let leader_col = stmt.column_index("leader")
            .map_err(|_| DashboardError::Database("查询结果缺少 leader 列".to_string()))?;
        let type_col = stmt.column_index("type1")
            .map_err(|_| DashboardError::Database("查询结果缺少 type1 列".to_string()))?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, Option<String>>(leader_col)?, row.get::<_, Option<String>>(type_col)?))
        })?;

        let mut results = Vec::new();
        for row in rows {
            match row? {
                (Some(leader), Some(type1)) => results.push(LeaderTypeRow { leader, type1 }),
                (leader, _) => debug!("跳过不完整的属性行: {:?}", leader),
            }
        }

        let elapsed = start_time.elapsed();
        self.statistics.queries_executed += 1;
        self.statistics.rows_read += results.len() as u64;
        self.statistics.total_query_time += elapsed;

        debug!("领袖属性查询完成: {} 行, 耗时 {:?}", results.len(), elapsed);
        Ok(results)
    }
}
