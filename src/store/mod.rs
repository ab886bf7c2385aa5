use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};

use crate::errors::{AppError, AppResult};

/// Row counts shown by the database-management operation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub members: u64,
    pub images: u64,
    pub fanbox_posts: u64,
    pub sketch_posts: u64,
}

/// Persistent download database.
///
/// Opened once at session start with the configured root directory and
/// target file, closed exactly once at teardown. Handlers only use the
/// narrow bookkeeping surface below.
pub struct Store {
    conn: Connection,
    path: PathBuf,
}

impl Store {
    /// Open (or create) the database under `root` at `target` and make sure
    /// the schema exists.
    pub fn open(root: &str, target: &str) -> AppResult<Self> {
        let target_path = Path::new(target);
        let path = if target_path.is_absolute() {
            target_path.to_path_buf()
        } else {
            Path::new(root).join(target_path)
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        let store = Store { conn, path };
        store.create_schema()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create_schema(&self) -> AppResult<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS pixiv_master_member (
                 member_id INTEGER PRIMARY KEY,
                 name TEXT,
                 last_update_date TEXT
             );
             CREATE TABLE IF NOT EXISTS pixiv_master_image (
                 image_id INTEGER PRIMARY KEY,
                 member_id INTEGER,
                 title TEXT,
                 save_name TEXT,
                 created_date TEXT,
                 last_update_date TEXT
             );
             CREATE TABLE IF NOT EXISTS fanbox_master_post (
                 post_id TEXT PRIMARY KEY,
                 member_id TEXT,
                 title TEXT,
                 updated_date TEXT
             );
             CREATE TABLE IF NOT EXISTS sketch_master_post (
                 post_id INTEGER PRIMARY KEY,
                 artist_id TEXT,
                 title TEXT,
                 updated_date TEXT
             );",
        )?;
        Ok(())
    }

    // ---------------------------
    // Bookkeeping used by the handlers
    // ---------------------------

    pub fn record_member(&self, member_id: u64, name: &str) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO pixiv_master_member (member_id, name, last_update_date)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(member_id) DO UPDATE SET
                 name = excluded.name,
                 last_update_date = excluded.last_update_date",
            params![member_id as i64, name],
        )?;
        Ok(())
    }

    pub fn record_image(
        &self,
        image_id: u64,
        member_id: Option<u64>,
        title: &str,
    ) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO pixiv_master_image
                 (image_id, member_id, title, save_name, created_date, last_update_date)
             VALUES (?1, ?2, ?3, '', datetime('now'), datetime('now'))
             ON CONFLICT(image_id) DO UPDATE SET
                 title = excluded.title,
                 last_update_date = excluded.last_update_date",
            params![image_id as i64, member_id.map(|m| m as i64), title],
        )?;
        Ok(())
    }

    pub fn is_image_downloaded(&self, image_id: u64) -> AppResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM pixiv_master_image WHERE image_id = ?1",
            params![image_id as i64],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn record_fanbox_post(&self, post_id: &str, member_id: &str, title: &str) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO fanbox_master_post (post_id, member_id, title, updated_date)
             VALUES (?1, ?2, ?3, datetime('now'))
             ON CONFLICT(post_id) DO UPDATE SET
                 title = excluded.title,
                 updated_date = excluded.updated_date",
            params![post_id, member_id, title],
        )?;
        Ok(())
    }

    pub fn record_sketch_post(&self, post_id: u64, artist_id: &str, title: &str) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO sketch_master_post (post_id, artist_id, title, updated_date)
             VALUES (?1, ?2, ?3, datetime('now'))
             ON CONFLICT(post_id) DO UPDATE SET
                 title = excluded.title,
                 updated_date = excluded.updated_date",
            params![post_id as i64, artist_id, title],
        )?;
        Ok(())
    }

    pub fn member_ids(&self) -> AppResult<Vec<u64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT member_id FROM pixiv_master_member ORDER BY member_id")?;
        // Ids are stored as SQLite integers; widen back at the boundary.
        let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r? as u64);
        }
        Ok(out)
    }

    /// Export recorded image ids as plain text, one table section per
    /// enabled source (menu option l).
    pub fn export_images(
        &self,
        filename: &str,
        use_pixiv: bool,
        use_fanbox: bool,
        use_sketch: bool,
    ) -> AppResult<usize> {
        let mut lines: Vec<String> = Vec::new();

        if use_pixiv {
            let mut stmt = self
                .conn
                .prepare("SELECT image_id FROM pixiv_master_image ORDER BY image_id")?;
            let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
            for r in rows {
                lines.push(r?.to_string());
            }
        }
        if use_fanbox {
            let mut stmt = self
                .conn
                .prepare("SELECT post_id FROM fanbox_master_post ORDER BY post_id")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            for r in rows {
                lines.push(format!("fanbox:{}", r?));
            }
        }
        if use_sketch {
            let mut stmt = self
                .conn
                .prepare("SELECT post_id FROM sketch_master_post ORDER BY post_id")?;
            let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
            for r in rows {
                lines.push(format!("sketch:{}", r?));
            }
        }

        let count = lines.len();
        fs::write(filename, lines.join("\n") + "\n")?;
        Ok(count)
    }

    /// Import member ids from a list file into the member table.
    pub fn import_members(&self, member_ids: &[u64]) -> AppResult<usize> {
        let mut imported = 0;
        for id in member_ids {
            self.record_member(*id, "")?;
            imported += 1;
        }
        Ok(imported)
    }

    pub fn stats(&self) -> AppResult<StoreStats> {
        let count = |table: &str| -> AppResult<u64> {
            Ok(self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get::<_, i64>(0)
                })? as u64)
        };
        Ok(StoreStats {
            members: count("pixiv_master_member")?,
            images: count("pixiv_master_image")?,
            fanbox_posts: count("fanbox_master_post")?,
            sketch_posts: count("sketch_master_post")?,
        })
    }

    pub fn vacuum(&self) -> AppResult<()> {
        self.conn.execute_batch("VACUUM")?;
        Ok(())
    }

    /// Close the connection. Called exactly once at teardown, even on error
    /// paths.
    pub fn close(self) -> AppResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| AppError::Db(e))?;
        Ok(())
    }
}
