//! i18n module - internationalization support

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Zh,
    Ja,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Zh, Language::Ja];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::Ja => "ja",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "en" => Language::En,
            "ja" => Language::Ja,
            _ => Language::Zh,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Zh => "简体中文",
            Language::Ja => "日本語",
        }
    }

    pub fn text(&self) -> &'static Translation {
        match self {
            Language::En => &EN_US,
            Language::Zh => &ZH_CN,
            Language::Ja => &JA_JP,
        }
    }
}

pub struct Translation {
    // Tab & General
    pub tab_title: &'static str, pub heading: &'static str, pub menu_language: &'static str,

    // Inputs
    pub label_sheet: &'static str, pub btn_pick_image: &'static str, pub label_no_image: &'static str,
    pub label_rows: &'static str, pub label_cols: &'static str, pub label_frame_size: &'static str,
    pub group_timing: &'static str, pub label_fps: &'static str, pub label_duration: &'static str,
    pub label_loop: &'static str, pub btn_convert: &'static str,

    // Output
    pub label_output_dir: &'static str, pub btn_pick_dir: &'static str, pub label_unique_names: &'static str,
    pub hover_unique_names: &'static str,

    // Result preview
    pub label_result: &'static str, pub player_play: &'static str, pub player_pause: &'static str,
    pub player_stop: &'static str, pub player_frame: &'static str,

    // Status
    pub msg_saved: &'static str, pub msg_no_image: &'static str, pub msg_load_failed: &'static str,
    pub msg_export_failed: &'static str,
}

pub const EN_US: Translation = Translation {
    tab_title: "🎞️ Sprite Sheet to GIF", heading: "👾 Sprite Sheet to GIF Converter", menu_language: "Language",
    label_sheet: "Sprite Sheet", btn_pick_image: "📂 Open Image...", label_no_image: "No image loaded",
    label_rows: "Rows", label_cols: "Cols", label_frame_size: "Frame size",
    group_timing: "⏱️ Timing (linked)", label_fps: "FPS", label_duration: "Interval (ms)",
    label_loop: "Loop", btn_convert: "Convert",
    label_output_dir: "Output folder:", btn_pick_dir: "📂", label_unique_names: "Never overwrite",
    hover_unique_names: "Add a numeric suffix when a GIF with the same timestamp already exists",
    label_result: "Result GIF", player_play: "⏵ Play", player_pause: "⏸ Pause",
    player_stop: "⏹ Stop", player_frame: "Frame",
    msg_saved: "GIF saved:", msg_no_image: "Please load a sprite sheet first.", msg_load_failed: "Failed to open image:",
    msg_export_failed: "Conversion failed:",
};

pub const ZH_CN: Translation = Translation {
    tab_title: "🎞️ 精灵图转 GIF", heading: "👾 Sprite Sheet to GIF Converter", menu_language: "语言",
    label_sheet: "上传精灵图 (Sprite Sheet)", btn_pick_image: "📂 打开图片...", label_no_image: "未加载图片",
    label_rows: "行数 (Rows)", label_cols: "列数 (Cols)", label_frame_size: "单帧尺寸",
    group_timing: "⏱️ 时间设置 (自动联动)", label_fps: "帧率 (FPS)", label_duration: "帧间隔 (ms)",
    label_loop: "循环播放 (Loop)", btn_convert: "开始转换",
    label_output_dir: "输出目录:", btn_pick_dir: "📂", label_unique_names: "不覆盖同名文件",
    hover_unique_names: "同一秒内重复导出时自动追加编号",
    label_result: "结果 GIF", player_play: "⏵ 播放", player_pause: "⏸ 暂停",
    player_stop: "⏹ 停止", player_frame: "帧",
    msg_saved: "GIF 已保存:", msg_no_image: "请先上传精灵图。", msg_load_failed: "无法打开图片:",
    msg_export_failed: "转换失败:",
};

pub const JA_JP: Translation = Translation {
    tab_title: "🎞️ スプライトシート → GIF", heading: "👾 Sprite Sheet to GIF Converter", menu_language: "言語",
    label_sheet: "スプライトシート", btn_pick_image: "📂 画像を開く...", label_no_image: "画像が読み込まれていません",
    label_rows: "行数", label_cols: "列数", label_frame_size: "フレームサイズ",
    group_timing: "⏱️ タイミング (連動)", label_fps: "FPS", label_duration: "間隔 (ms)",
    label_loop: "ループ", btn_convert: "変換",
    label_output_dir: "出力フォルダ:", btn_pick_dir: "📂", label_unique_names: "上書きしない",
    hover_unique_names: "同じタイムスタンプの GIF がある場合は連番を付けます",
    label_result: "結果 GIF", player_play: "⏵ 再生", player_pause: "⏸ 一時停止",
    player_stop: "⏹ 停止", player_frame: "フレーム",
    msg_saved: "GIF を保存しました:", msg_no_image: "先にスプライトシートを読み込んでください。", msg_load_failed: "画像を開けません:",
    msg_export_failed: "変換に失敗しました:",
};
