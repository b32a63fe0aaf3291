//! Ротация цепочки `name.json`, `name.json.1`, `name.json.2`, ...
//!
//! Суффикс `N` означает, что файл на `N` ротаций старше активного.
//! Ротация выполняется один раз при старте процесса, до открытия файла на
//! запись, и не хранит никакого состояния кроме самих файлов.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::BASE_EXTENSION;
use crate::error::{LogError, Result};

// ===== Поколения =====

/// Номер поколения файла по последнему сегменту имени после точки:
/// `json`: активный файл (0), иначе сегмент обязан быть числом.
pub fn generation_of(path: &Path) -> Result<usize> {
    let name = file_name(path);
    let suffix = name.rsplit('.').next().unwrap_or_default();
    if suffix == BASE_EXTENSION {
        return Ok(0);
    }
    suffix
        .parse::<usize>()
        .map_err(|source| LogError::RotationSuffix {
            path: path.to_path_buf(),
            suffix: suffix.to_owned(),
            source,
        })
}

/// Путь поколения `n` для активного файла `base`.
pub fn generation_path(base: &Path, n: usize) -> PathBuf {
    if n == 0 {
        return base.to_path_buf();
    }
    let mut raw: OsString = base.as_os_str().to_owned();
    raw.push(format!(".{}", n));
    PathBuf::from(raw)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Отрезает числовой суффикс, возвращая путь активного файла.
fn base_path(path: &Path, generation: usize) -> PathBuf {
    if generation == 0 {
        return path.to_path_buf();
    }
    let name = file_name(path);
    match name.rfind('.') {
        Some(cut) => path.with_file_name(&name[..cut]),
        None => path.to_path_buf(),
    }
}

fn exists(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(LogError::fs("stat", path, e)),
    }
}

// ===== Ротация =====

/// Сдвигает `path` и все следующие за ним поколения на одно вверх.
///
/// Файл, который стал бы поколением `max_files`, удаляется. Переименование
/// идёт от самого старого звена к `path`, поэтому цель каждого `rename`
/// к моменту вызова свободна. Разрыв в цепочке (например, `.2` есть, а `.1`
/// нет) останавливает обход: всё, что за разрывом, не трогается.
///
/// Отсутствующий `path`: не ошибка. При сбое файловой системы ротация
/// прерывается, и часть файлов может остаться уже сдвинутой.
pub fn rotate(path: &Path, max_files: usize) -> Result<()> {
    if max_files < 1 {
        return Err(LogError::Config("max_files must be at least 1".to_owned()));
    }
    if !exists(path)? {
        return Ok(());
    }

    let first = generation_of(path)?;
    let base = base_path(path, first);

    // Конец непрерывной цепочки, начиная с path
    let mut last = first;
    while last + 1 != max_files && exists(&generation_path(&base, last + 1))? {
        last += 1;
    }

    let tail = generation_path(&base, last);
    if last + 1 == max_files {
        fs::remove_file(&tail).map_err(|e| LogError::fs("remove", &tail, e))?;
    } else {
        rename(&tail, &generation_path(&base, last + 1))?;
    }

    for generation in (first..last).rev() {
        rename(
            &generation_path(&base, generation),
            &generation_path(&base, generation + 1),
        )?;
    }

    Ok(())
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|e| LogError::fs("rename", from, e))
}

/// Удаляет копии с суффиксом `>= max_files`, оставшиеся от запусков с
/// большим лимитом. Файлы с нечисловым суффиксом не трогаются.
/// Возвращает число удалённых файлов.
pub fn prune_stale(path: &Path, max_files: usize) -> Result<usize> {
    let base = base_path(path, generation_of(path)?);
    let dir = match base.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let prefix = format!("{}.", file_name(&base));

    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(LogError::fs("read directory", &dir, e)),
    };

    let mut removed = 0;
    for entry in entries {
        let entry = entry.map_err(|e| LogError::fs("read directory", &dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(rest) = name.strip_prefix(&prefix) else {
            continue;
        };
        // Только имена, которые мог создать generation_path: без `+` и ведущих нулей
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        match rest.parse::<usize>() {
            Ok(n)
                if n >= max_files
                    && generation_path(&base, n).file_name() == Some(entry.file_name().as_os_str()) =>
            {
                let stale = entry.path();
                fs::remove_file(&stale).map_err(|e| LogError::fs("remove", &stale, e))?;
                removed += 1;
            }
            _ => {}
        }
    }
    Ok(removed)
}
