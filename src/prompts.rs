//! Prompt templates for Vue + Element Plus single-file component generation
//!
//! Everything here is static text plus string assembly. The model-facing
//! wording is Chinese because the downstream code generator is asked to keep
//! Chinese/English text side by side.

use serde::{Deserialize, Serialize};

/// Closing line of the standard (non-enhanced) prompts
pub const STANDARD_CLOSING: &str = "请确保生成的代码是完整的、功能可用的，并严格遵守所有指示。";

/// Closing line appended after the enhancement pass
pub const ENHANCED_CLOSING: &str = "请确保生成的代码是完整的、功能可用的, 并严格遵守所有指示。";

pub const PC_GUIDELINES: &str = r#"1. 布局 (Layout)
   - 以 1920×1080 为设计基准，内容区最小宽度 1280px，超出时水平居中
   - 使用 el-container / el-header / el-aside / el-main 搭建页面骨架
   - 使用 el-row / el-col (24 栅格) 组织区块，区块间距统一为 16px 或 20px
2. 视觉 (Visual)
   - 主色 #409EFF，成功 #67C23A，警告 #E6A23C，危险 #F56C6C，信息 #909399
   - 正文 14px，标题 16px/18px/20px 三级，行高 1.5
   - 卡片圆角 4px，阴影使用 Element Plus 默认 shadow="hover"
3. 交互 (Interaction)
   - 表单必须有校验规则 (rules) 并在提交前调用 validate
   - 表格支持加载状态 (v-loading)、空状态与分页
   - 危险操作使用 ElMessageBox 二次确认，操作结果使用 ElMessage 反馈
4. 代码 (Code)
   - 使用 Vue 3 + <script setup> + Composition API
   - 数据使用 ref / reactive 管理，模拟数据集中定义在 script 顶部
   - 样式使用 <style scoped>，类名采用 kebab-case"#;

pub const APP_GUIDELINES: &str = r#"1. 布局 (Layout)
   - 以 375×812 为设计基准，使用弹性布局适配 320px 至 480px 宽度
   - 顶部导航栏高度 44px，底部操作区考虑安全区 (env(safe-area-inset-bottom))
   - 页面左右留白 16px，列表项最小高度 48px
2. 视觉 (Visual)
   - 主色 #409EFF，背景 #F5F7FA，卡片背景 #FFFFFF
   - 正文 14px，辅助文字 12px，标题 17px，字重 500
   - 可点击区域不小于 44×44px
3. 交互 (Interaction)
   - 列表支持下拉刷新与上拉加载的交互占位
   - 表单输入使用合适的键盘类型 (inputmode)，提交时给出加载态
   - 操作反馈使用轻提示 (ElMessage)，避免阻断式弹窗
4. 代码 (Code)
   - 使用 Vue 3 + <script setup> + Composition API
   - 使用 rem 或 vw 单位，避免固定像素宽度
   - 样式使用 <style scoped>，类名采用 kebab-case"#;

pub const DEFAULT_PC_REQUEST: &str =
    "生成一个后台管理系统的用户列表页面，包含搜索筛选区、数据表格、分页以及新增/编辑用户的对话框。";

pub const DEFAULT_APP_REQUEST: &str =
    "生成一个移动端个人中心页面，包含头像与昵称信息卡、常用功能入口宫格以及设置列表。";

/// Vision prompt for describing an uploaded UI screenshot
pub const IMAGE_ANALYSIS_PROMPT: &str = r#"请分析用户界面截图，识别并描述所有可见的界面元素和布局结构。按照下面的分析结构直接返回Markdown格式的内容：

请直接返回分析内容，不要添加任何标题、前缀或说明文字。不要包含"图像分析结果"、"分析如下"、"以下是分析"等任何引导性文字。

如果是数据看板类型，请分析：
1. 数据指标布局 (Metrics Layout)
2. 数据可视化 (Data Visualization)
3. 实时数据更新机制

如果是列表页类型，请分析：
1. 搜索筛选区 (Search & Filter)
2. 表格内容 (Table Content)
3. 分页组件 (Pagination)

无论哪种界面类型，都请分析：
1. 视觉设计 (Visual Design)
2. 交互反馈 (Interactive Feedback)
3. 辅助功能 (Auxiliary Features)

分析要求：
1. 严格使用<Image-Analysis></Image-Analysis>标签包裹所有内容
2. 使用Markdown格式，保持清晰的层级结构
3. 提供所有可见文本的中英文对照
4. 提供具体的色号、尺寸和间距

<Image-Analysis>
// 这里直接开始你的分析内容，不要添加任何标题或开场白
"#;

/// Response format of the component suggestion payload
pub const FILTER_COMPONENTS_PROMPT: &str = r#"<requirement>
As a web UI expert, analyze the provided UI description thoroughly and identify ONLY the specific components and charts from Element Plus library absolutely necessary to implement the described interface.

Your analysis should:
1. Consider the exact functional requirements in the description
2. Identify the minimum set of Element Plus components needed
3. Exclude components that might be nice-to-have but aren't essential
4. Justify each component's selection with a brief reason tied to the requirements
5. Consider performance and maintainability implications
</requirement>
<response_format>
{
  "components": [
    {
      "name": "string",
      "necessity": "critical|important|optional",
      "justification": "string"
    }
  ],
  "charts": [
    {
      "name": "string",
      "necessity": "critical|important|optional",
      "justification": "string"
    }
  ]
}
</response_format>"#;

const ELEMENT_PLUS_RULES: &str = r#"请使用 Element Plus 组件库实现此界面，确保生成的代码是完整的、功能可用的，并严格遵守以下要求：
1. 使用Vue 3和Composition API（setup语法糖）
2. 引入并注册所有必要的Element Plus组件
3. 遵循Element Plus组件的使用规范
4. 添加必要的交互逻辑（表单验证、数据筛选、分页等）
5. 使用响应式设计确保界面在不同屏幕尺寸下正常显示
6. 代码结构清晰，添加必要的注释
7. 所有文本保持中英文对照
"#;

/// Target platform of the generated component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    #[serde(rename = "PC")]
    Pc,
    #[serde(rename = "APP")]
    App,
}

impl Platform {
    /// Lenient parse used for multipart form fields; anything but `APP` is PC
    pub fn from_form_value(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("app") {
            Platform::App
        } else {
            Platform::Pc
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Pc => "PC端",
            Platform::App => "移动端",
        }
    }

    pub fn guidelines(&self) -> &'static str {
        match self {
            Platform::Pc => PC_GUIDELINES,
            Platform::App => APP_GUIDELINES,
        }
    }

    pub fn default_request(&self) -> &'static str {
        match self {
            Platform::Pc => DEFAULT_PC_REQUEST,
            Platform::App => DEFAULT_APP_REQUEST,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Pc => "PC",
            Platform::App => "APP",
        }
    }
}

fn effective_request(platform: Platform, request: Option<&str>) -> &str {
    match request {
        Some(r) if !r.trim().is_empty() => r,
        _ => platform.default_request(),
    }
}

/// Prompt body shared by the standard and enhanced tools
pub fn base_prompt(platform: Platform, request: Option<&str>) -> String {
    let label = platform.label();
    format!(
        "请根据以下具体需求和通用的{label}开发指导原则，生成一个完整的 Vue 单文件组件 (.vue)。\n\n\
         具体需求 (Specific Request):\n{request}\n\n\
         通用{label}开发指导原则 (General Development Guidelines):\n{guidelines}",
        request = effective_request(platform, request),
        guidelines = platform.guidelines(),
    )
}

pub fn standard_prompt(platform: Platform, request: Option<&str>) -> String {
    format!("{}\n\n{}", base_prompt(platform, request), STANDARD_CLOSING)
}

/// Meta-prompt asking the model to rewrite `base` into a stronger prompt
pub fn enhancement_request(platform: Platform, base: &str) -> String {
    let label = platform.label();
    format!(
        "你是一个专业的AI prompts工程师。请分析下面的提示词，并对其进行改进，使其能生成更好的代码。\n\
         添加更多技术细节和最佳实践，但保持原始需求不变。原始提示词：\n\
         {base}\n\n\
         需要你返回优化后提示词，减少不必要的输出。返回的提示词以\n\
         \"请根据以下具体需求和{label}开发指导原则，生成一个完整的 Vue 单文件组件 (.vue)\" 开头"
    )
}

/// Append the enhanced-prompt closing line
pub fn finish_enhanced(prompt: &str) -> String {
    format!("{}\n\n{}", prompt.trim_end(), ENHANCED_CLOSING)
}

/// Escape angle brackets so guidelines cannot be mistaken for markup
pub fn escape_angle_brackets(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Final prompt of the screenshot pipeline
pub fn component_prompt(
    platform: Platform,
    analysis: &str,
    suggestions: &str,
    request: Option<&str>,
) -> String {
    let label = platform.label();
    let guidelines = escape_angle_brackets(platform.guidelines());
    let mut prompt = format!(
        "请根据以下界面分析、Element Plus组件建议和开发指导原则，生成一个完整的 Vue 单文件组件 (.vue)。\n\n\
         ### 界面分析 (Interface Analysis):\n{analysis}\n\n\
         ### Element Plus组件建议 (Component Recommendations):\n{suggestions}\n\n"
    );
    if let Some(r) = request.filter(|r| !r.trim().is_empty()) {
        prompt.push_str(&format!("### 具体需求 (Specific Request):\n{r}\n\n"));
    }
    prompt.push_str(&format!(
        "### {label}开发指导原则 (General Development Guidelines):\n{guidelines}\n\n{ELEMENT_PLUS_RULES}"
    ));
    prompt
}
