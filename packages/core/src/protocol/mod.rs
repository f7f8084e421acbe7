// Форматы данных на границе движка
//
// - `wire`: hex-строки для значений DH
// - `envelope`: байтовый конверт гибридного шифрования

pub mod envelope;
pub mod wire;
